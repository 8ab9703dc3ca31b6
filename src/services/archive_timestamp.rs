//! Per-node validation of one archive time-stamp.
//!
//! Sequences the independent sub-checks for a single node: algorithm
//! declaration and consistency, chronology against the assigned secure date,
//! hash-tree integrity, digest coverage, algorithm suitability, and the
//! externally delegated token verification. Checks do not short-circuit one
//! another except where one subsumes another (coverage is meaningless
//! without a resolved root); every finding lands in the node's report.

use chrono::{DateTime, Utc};

use crate::domain::catalog::{AlgorithmUsage, UsageKind};
use crate::domain::crypto::{DigestValue, HashAlgorithm};
use crate::domain::record::ArchiveTimeStamp;
use crate::domain::report::{NodePath, NodeReport, SubIndication, ValidationReport, Verdict};
use crate::services::context::ValidationContext;
use crate::services::coverage::{DigestCoverageMatcher, DigestsToCover};
use crate::services::hash_tree::{HashTreeFailure, HashTreeReconstructor};
use crate::services::suitability::AlgorithmSuitabilityValidator;

/// Everything the chain walk knows about one node's place in the record.
pub struct TimeStampNodeInput<'a> {
    pub time_stamp: &'a ArchiveTimeStamp,
    pub path: NodePath,
    pub secure_date: DateTime<Utc>,
    pub digests_to_cover: DigestsToCover,
    /// Algorithm of the preceding node in the same chain, when one exists.
    pub previous_algorithm: Option<HashAlgorithm>,
    /// Preimage of a pass-through root, supplied by the chain walk for the
    /// single-leaf cases where the reconstructor cannot know it.
    pub root_source_hint: Option<Vec<u8>>,
}

pub struct ArchiveTimeStampValidator;

impl ArchiveTimeStampValidator {
    pub fn validate_node(
        ctx: &ValidationContext<'_>,
        input: TimeStampNodeInput<'_>,
        report: &mut ValidationReport,
    ) {
        let findings_before = report.entries().len();
        let node = input.time_stamp;
        let token = node.token();
        let token_algorithm = token.message_imprint_algorithm();
        let path = &input.path;

        log::debug!("validating {path} ({token_algorithm})");

        // Algorithm declaration and consistency.
        if !ctx.declared_algorithms.contains(&token_algorithm) {
            report.push(NodeReport::invalid(
                path.clone(),
                SubIndication::InvalidFormat,
                format!(
                    "digest algorithm {token_algorithm} of the time-stamp is not declared in the evidence record"
                ),
            ));
        }
        if let Some(declared) = node.digest_algorithm() {
            if declared != token_algorithm {
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::InvalidFormat,
                    format!(
                        "digest algorithm attribute {declared} does not match the time-stamp's message imprint algorithm {token_algorithm}"
                    ),
                ));
            }
        }
        if let Some(previous) = input.previous_algorithm {
            if previous != node.algorithm() {
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::InvalidFormat,
                    format!(
                        "digest algorithm {} differs from the preceding time-stamp's algorithm {previous} within the same chain",
                        node.algorithm()
                    ),
                ));
            }
        }

        // Chronology: this node must be anchored strictly before the date a
        // later time-stamp (or the present) vouches for it.
        let signing_time = token.signing_time();
        if signing_time >= input.secure_date {
            report.push(NodeReport::invalid(
                path.clone(),
                SubIndication::OutOfBoundsNoPoe,
                format!(
                    "time-stamp generation time {signing_time} is not strictly before its secure date {}",
                    input.secure_date
                ),
            ));
        }

        // Suitability is judged at the secure date, not at validation time.
        let usage = AlgorithmUsage::new(token_algorithm, input.secure_date, UsageKind::Hashing);
        AlgorithmSuitabilityValidator::report_into(&usage, ctx.catalog, path.clone(), report);

        // Hash-tree integrity, then coverage over the resolved tree.
        let imprint = token.message_imprint_digest();
        let levels = node.reduced_hash_tree();
        let resolved =
            match HashTreeReconstructor::resolve(levels, token_algorithm, &imprint) {
                Ok(root) => Some(root),
                Err(HashTreeFailure::NoCombinationMatches) => {
                    report.push(NodeReport::invalid(
                        path.clone(),
                        SubIndication::HashValueMismatch,
                        "reduced hash tree does not reproduce the time-stamp's message imprint under any combination".to_string(),
                    ));
                    None
                }
                Err(HashTreeFailure::EmptyLevel { index }) => {
                    report.push(NodeReport::indetermined(
                        path.clone(),
                        Some(SubIndication::CryptoConstraintsFailure),
                        format!("hash tree level {index} holds no digest values"),
                    ));
                    None
                }
            };

        if let Some(root) = &resolved {
            if levels.is_empty() && input.digests_to_cover.required_count() > 1 {
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::InvalidFormat,
                    format!(
                        "reduced hash tree is absent but {} digests must be covered",
                        input.digests_to_cover.required_count()
                    ),
                ));
            } else {
                let actual: &[DigestValue] = if levels.is_empty() {
                    std::slice::from_ref(&root.digest)
                } else {
                    levels[0].digests()
                };
                DigestCoverageMatcher::check(&input.digests_to_cover, actual, path, report);
            }
        }

        // Delegate the token itself outward, handing over the byte string it
        // mathematically covers when one is determinable.
        let source = resolved
            .as_ref()
            .and_then(|root| root.source.clone())
            .or(input.root_source_hint);
        let outcome = token.verify(source.as_deref());
        match outcome.verdict {
            Verdict::Valid => {}
            Verdict::Invalid => {
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::SignatureInvalid,
                    outcome
                        .diagnostics
                        .unwrap_or_else(|| "time-stamp token verification failed".to_string()),
                ));
            }
            Verdict::Indetermined => {
                report.push(NodeReport::indetermined(
                    path.clone(),
                    None,
                    outcome
                        .diagnostics
                        .unwrap_or_else(|| "time-stamp token verification inconclusive".to_string()),
                ));
            }
        }

        if report.entries().len() == findings_before {
            report.push(NodeReport::valid(
                path.clone(),
                "archive time-stamp validation succeeded",
            ));
        }
    }
}
