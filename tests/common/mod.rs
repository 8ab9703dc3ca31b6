//! Shared fixtures for the integration suites.
//!
//! Provides a deterministic in-memory time-stamp token double plus builders
//! for records whose hash trees are consistent with their tokens' imprints.

// Not every suite uses every helper.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ers_verifier::{
    AlgorithmSuitability, ArchiveTimeStamp, DigestValue, HashAlgorithm, InMemoryCatalog,
    PartialHashTree, TimestampToken, TokenVerificationOutcome,
};

/// Test double for an externally verifiable time-stamp token.
#[derive(Debug, Clone)]
pub struct StaticToken {
    signing_time: DateTime<Utc>,
    algorithm: HashAlgorithm,
    imprint: DigestValue,
    content: Vec<u8>,
    outcome: TokenVerificationOutcome,
}

impl StaticToken {
    pub fn new(
        signing_time: DateTime<Utc>,
        algorithm: HashAlgorithm,
        imprint: DigestValue,
    ) -> Self {
        // Unique, stable content bytes per token; chains hash over these.
        let mut content = b"tst-content:".to_vec();
        content.extend_from_slice(imprint.as_slice());
        content.extend_from_slice(signing_time.timestamp().to_be_bytes().as_slice());
        Self {
            signing_time,
            algorithm,
            imprint,
            content,
            outcome: TokenVerificationOutcome::valid(),
        }
    }

    pub fn with_outcome(mut self, outcome: TokenVerificationOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

impl TimestampToken for StaticToken {
    fn signing_time(&self) -> DateTime<Utc> {
        self.signing_time
    }

    fn message_imprint_digest(&self) -> DigestValue {
        self.imprint.clone()
    }

    fn message_imprint_algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn raw_content_bytes(&self) -> &[u8] {
        &self.content
    }

    fn verify(&self, _root_source: Option<&[u8]>) -> TokenVerificationOutcome {
        self.outcome.clone()
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Catalog accepting every supported algorithm with no dated limit.
pub fn permissive_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for algorithm in [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ] {
        catalog.insert(algorithm, AlgorithmSuitability::default());
    }
    catalog
}

/// Root value of a single hash-tree level under list semantics: a lone
/// member passes through, several are sorted, concatenated, and hashed.
pub fn level_root(digests: &[DigestValue], algorithm: HashAlgorithm) -> DigestValue {
    match digests {
        [only] => only.clone(),
        _ => {
            let mut members: Vec<&[u8]> = digests.iter().map(DigestValue::as_slice).collect();
            members.sort_unstable();
            DigestValue::new(algorithm.compute(&members.concat()))
        }
    }
}

/// An archive time-stamp whose single-level tree covers `digests` and whose
/// token imprint is the matching root.
pub fn node_covering(
    digests: Vec<DigestValue>,
    algorithm: HashAlgorithm,
    signing_time: DateTime<Utc>,
) -> ArchiveTimeStamp {
    let imprint = level_root(&digests, algorithm);
    let token = StaticToken::new(signing_time, algorithm, imprint);
    ArchiveTimeStamp::new(Box::new(token))
        .with_reduced_hash_tree(vec![PartialHashTree::new(digests)])
}

/// The digest a renewing time-stamp must cover for its predecessor.
pub fn renewal_digest(previous: &ArchiveTimeStamp, algorithm: HashAlgorithm) -> DigestValue {
    DigestValue::new(algorithm.compute(previous.token().raw_content_bytes()))
}
