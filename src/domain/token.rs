//! Time-stamp token capability.
//!
//! The engine treats the cryptographic time-stamp token as an opaque,
//! externally verifiable object: it only needs the token's signing time, its
//! message-imprint digest and algorithm, the raw token bytes (the material a
//! later time-stamp of the same chain must cover), and a way to delegate
//! signature/certificate verification outward. Concrete token
//! representations live with the caller, never in this crate.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::crypto::{DigestValue, HashAlgorithm};
use crate::domain::report::Verdict;

/// Outcome of the externally delegated token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerificationOutcome {
    pub verdict: Verdict,
    pub diagnostics: Option<String>,
}

impl TokenVerificationOutcome {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            verdict: Verdict::Valid,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn invalid(diagnostics: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Invalid,
            diagnostics: Some(diagnostics.into()),
        }
    }

    #[must_use]
    pub fn indetermined(diagnostics: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Indetermined,
            diagnostics: Some(diagnostics.into()),
        }
    }
}

/// Abstract capability over an externally verifiable time-stamp token.
///
/// `raw_content_bytes` must return the exact byte string whose digest a
/// renewing time-stamp covers; chaining correctness depends on it being
/// stable across calls.
pub trait TimestampToken: fmt::Debug + Send + Sync {
    /// Generation time asserted by the time-stamp authority.
    fn signing_time(&self) -> DateTime<Utc>;

    /// Digest embedded in the token's message imprint.
    fn message_imprint_digest(&self) -> DigestValue;

    /// Algorithm of the message imprint.
    fn message_imprint_algorithm(&self) -> HashAlgorithm;

    /// Raw token bytes as archived; the chaining material for the next node.
    fn raw_content_bytes(&self) -> &[u8];

    /// Delegate cryptographic verification of the token itself.
    ///
    /// `root_source` is the reconstructed byte string the token's imprint is
    /// expected to cover, when the hash-tree walk could determine one.
    fn verify(&self, root_source: Option<&[u8]>) -> TokenVerificationOutcome;
}
