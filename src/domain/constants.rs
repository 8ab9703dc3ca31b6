//! Centralized constants for commonly repeated identifiers and labels.
//! Keep this intentionally small; only broadly reused literals should live here.

// === Digest Algorithm OIDs (dotted notation) ===

/// SHA-1 algorithm OID (1.3.14.3.2.26)
pub const OID_SHA1: &str = "1.3.14.3.2.26";

/// SHA-256 algorithm OID (2.16.840.1.101.3.4.2.1)
pub const OID_SHA256: &str = "2.16.840.1.101.3.4.2.1";

/// SHA-384 algorithm OID (2.16.840.1.101.3.4.2.2)
pub const OID_SHA384: &str = "2.16.840.1.101.3.4.2.2";

/// SHA-512 algorithm OID (2.16.840.1.101.3.4.2.3)
pub const OID_SHA512: &str = "2.16.840.1.101.3.4.2.3";

// === Evidence Record Structure ===

/// The only evidence-record version this engine accepts.
pub const EVIDENCE_RECORD_VERSION: u32 = 1;

/// Reference label for the digest a time-stamp must cover when it renews the
/// preceding time-stamp of the same chain.
pub const REF_PREVIOUS_TIME_STAMP: &str = "previous TSP of chain";

/// Reference label for the running hash of prior chains injected at an
/// algorithm-renewal boundary.
pub const REF_RENEWED_CHAIN_HASH: &str = "renewed chain hash";
