//! Evidence record data model.
//!
//! The parsed tree the external decoder produces: a record owns one
//! archive-time-stamp sequence, a sequence owns chains (one per
//! algorithm-renewal era), a chain owns time-stamps, and each time-stamp
//! carries a reduced hash tree plus its token. The whole structure is
//! immutable during verification; validators keep their own transient state.

use std::collections::BTreeMap;

use crate::domain::constants::EVIDENCE_RECORD_VERSION;
use crate::domain::crypto::{DigestValue, HashAlgorithm};
use crate::domain::token::TimestampToken;

/// Opaque attribute bag attached by the decoder.
///
/// The engine never interprets entries; strict profiles only check for the
/// bag's absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, Vec<u8>>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Vec<u8>) {
        self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.0.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One level of a reduced hash tree: an unordered multiset of digest values.
///
/// Containment is byte-exact; the insertion order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialHashTree {
    digests: Vec<DigestValue>,
}

impl PartialHashTree {
    #[must_use]
    pub fn new(digests: Vec<DigestValue>) -> Self {
        Self { digests }
    }

    #[must_use]
    pub fn digests(&self) -> &[DigestValue] {
        &self.digests
    }

    #[must_use]
    pub fn contains(&self, digest: &DigestValue) -> bool {
        self.digests.iter().any(|d| d == digest)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

impl From<Vec<DigestValue>> for PartialHashTree {
    fn from(digests: Vec<DigestValue>) -> Self {
        Self::new(digests)
    }
}

/// One archive time-stamp: a reduced hash tree connecting protected digests
/// to the message imprint of an embedded, externally verifiable token.
///
/// The token is always present; a decoder that cannot produce one must fail
/// structurally. `reduced_hash_tree` may be empty only when exactly one
/// digest is protected, in which case the token's imprint covers it directly.
#[derive(Debug)]
pub struct ArchiveTimeStamp {
    digest_algorithm: Option<HashAlgorithm>,
    attributes: Attributes,
    reduced_hash_tree: Vec<PartialHashTree>,
    token: Box<dyn TimestampToken>,
}

impl ArchiveTimeStamp {
    #[must_use]
    pub fn new(token: Box<dyn TimestampToken>) -> Self {
        Self {
            digest_algorithm: None,
            attributes: Attributes::new(),
            reduced_hash_tree: Vec::new(),
            token,
        }
    }

    #[must_use]
    pub fn with_digest_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.digest_algorithm = Some(algorithm);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_reduced_hash_tree(mut self, levels: Vec<PartialHashTree>) -> Self {
        self.reduced_hash_tree = levels;
        self
    }

    /// Explicit per-node algorithm attribute, when the decoder saw one.
    #[must_use]
    pub fn digest_algorithm(&self) -> Option<HashAlgorithm> {
        self.digest_algorithm
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Levels of the reduced hash tree, index 0 nearest the protected data.
    #[must_use]
    pub fn reduced_hash_tree(&self) -> &[PartialHashTree] {
        &self.reduced_hash_tree
    }

    #[must_use]
    pub fn token(&self) -> &dyn TimestampToken {
        self.token.as_ref()
    }

    /// Effective digest algorithm: the explicit attribute when present,
    /// otherwise the algorithm of the token's message imprint.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.digest_algorithm
            .unwrap_or_else(|| self.token.message_imprint_algorithm())
    }

    /// Structural equality: same algorithm attribute, same tree levels in
    /// order, and byte-identical token content. Token identity is ignored.
    #[must_use]
    pub fn structurally_equals(&self, other: &Self) -> bool {
        self.digest_algorithm == other.digest_algorithm
            && self.attributes == other.attributes
            && self.reduced_hash_tree == other.reduced_hash_tree
            && self.token.raw_content_bytes() == other.token.raw_content_bytes()
    }
}

/// Ordered list of archive time-stamps sharing one digest algorithm era.
#[derive(Debug)]
pub struct ArchiveTimeStampChain {
    time_stamps: Vec<ArchiveTimeStamp>,
    raw_encoding: Vec<u8>,
}

impl ArchiveTimeStampChain {
    /// `raw_encoding` is the decoder-supplied serialized form of this chain,
    /// consumed when a later chain hashes over its predecessors.
    #[must_use]
    pub fn new(time_stamps: Vec<ArchiveTimeStamp>, raw_encoding: Vec<u8>) -> Self {
        Self {
            time_stamps,
            raw_encoding,
        }
    }

    #[must_use]
    pub fn time_stamps(&self) -> &[ArchiveTimeStamp] {
        &self.time_stamps
    }

    #[must_use]
    pub fn raw_encoding(&self) -> &[u8] {
        &self.raw_encoding
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time_stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_stamps.is_empty()
    }

    #[must_use]
    pub fn structurally_equals(&self, other: &Self) -> bool {
        self.raw_encoding == other.raw_encoding
            && self.time_stamps.len() == other.time_stamps.len()
            && self
                .time_stamps
                .iter()
                .zip(other.time_stamps.iter())
                .all(|(a, b)| a.structurally_equals(b))
    }
}

/// Ordered list of chains spanning algorithm-renewal events; chronological
/// order is significant. Empty is legal but vacuous.
#[derive(Debug, Default)]
pub struct ArchiveTimeStampSequence {
    chains: Vec<ArchiveTimeStampChain>,
}

impl ArchiveTimeStampSequence {
    #[must_use]
    pub fn new(chains: Vec<ArchiveTimeStampChain>) -> Self {
        Self { chains }
    }

    #[must_use]
    pub fn chains(&self) -> &[ArchiveTimeStampChain] {
        &self.chains
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Serialized form of this sequence truncated to chains `[0..k)`.
    ///
    /// Contract with the decoder: the per-chain encodings it supplies must
    /// concatenate to the serialization it would produce for the truncated
    /// sequence, so the renewal hash computed here matches the one the
    /// archiving system fixed into the first time-stamp of chain `k`.
    #[must_use]
    pub fn truncated_encoding(&self, k: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for chain in self.chains.iter().take(k) {
            out.extend_from_slice(chain.raw_encoding());
        }
        out
    }

    #[must_use]
    pub fn structurally_equals(&self, other: &Self) -> bool {
        self.chains.len() == other.chains.len()
            && self
                .chains
                .iter()
                .zip(other.chains.iter())
                .all(|(a, b)| a.structurally_equals(b))
    }
}

/// A parsed evidence record, produced entirely by the external decoder.
#[derive(Debug)]
pub struct EvidenceRecord {
    version: u32,
    digest_algorithms: Vec<HashAlgorithm>,
    crypto_info: Option<Attributes>,
    encryption_info: Option<Attributes>,
    sequence: ArchiveTimeStampSequence,
}

impl EvidenceRecord {
    #[must_use]
    pub fn new(
        version: u32,
        digest_algorithms: Vec<HashAlgorithm>,
        sequence: ArchiveTimeStampSequence,
    ) -> Self {
        Self {
            version,
            digest_algorithms,
            crypto_info: None,
            encryption_info: None,
            sequence,
        }
    }

    #[must_use]
    pub fn with_crypto_info(mut self, info: Attributes) -> Self {
        self.crypto_info = Some(info);
        self
    }

    #[must_use]
    pub fn with_encryption_info(mut self, info: Attributes) -> Self {
        self.encryption_info = Some(info);
        self
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn has_expected_version(&self) -> bool {
        self.version == EVIDENCE_RECORD_VERSION
    }

    /// Algorithms declared usable anywhere in the record, in declaration order.
    #[must_use]
    pub fn digest_algorithms(&self) -> &[HashAlgorithm] {
        &self.digest_algorithms
    }

    #[must_use]
    pub fn declares_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        self.digest_algorithms.contains(&algorithm)
    }

    #[must_use]
    pub fn crypto_info(&self) -> Option<&Attributes> {
        self.crypto_info.as_ref()
    }

    #[must_use]
    pub fn encryption_info(&self) -> Option<&Attributes> {
        self.encryption_info.as_ref()
    }

    #[must_use]
    pub fn sequence(&self) -> &ArchiveTimeStampSequence {
        &self.sequence
    }
}

/// One archived data object the record is expected to prove: a reference
/// name, its digest, and optionally the raw content (needed only to hand the
/// external token verifier a hash source in the single-object case).
#[derive(Debug, Clone)]
pub struct ProtectedDataObject {
    reference: String,
    digest: DigestValue,
    content: Option<Vec<u8>>,
}

impl ProtectedDataObject {
    #[must_use]
    pub fn new(reference: impl Into<String>, digest: DigestValue) -> Self {
        Self {
            reference: reference.into(),
            digest,
            content: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = Some(content);
        self
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub fn digest(&self) -> &DigestValue {
        &self.digest
    }

    #[must_use]
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }
}

/// The set of archived data objects a verification run checks the record
/// against.
#[derive(Debug, Clone, Default)]
pub struct ProtectedData {
    objects: Vec<ProtectedDataObject>,
}

impl ProtectedData {
    #[must_use]
    pub fn new(objects: Vec<ProtectedDataObject>) -> Self {
        Self { objects }
    }

    pub fn push(&mut self, object: ProtectedDataObject) {
        self.objects.push(object);
    }

    #[must_use]
    pub fn objects(&self) -> &[ProtectedDataObject] {
        &self.objects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
