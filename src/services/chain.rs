//! Chain validation: one algorithm era of the archive.
//!
//! Walks a chain node by node, building each node's digests-to-cover from
//! the previous node's token content and advancing the chain state. The
//! first node either covers the protected digests directly (first chain) or
//! covers each protected digest rehashed together with the running hash of
//! all prior chains (algorithm-renewal event).

use std::collections::BTreeMap;

use crate::domain::constants::REF_PREVIOUS_TIME_STAMP;
use crate::domain::crypto::{DigestValue, HashAlgorithm};
use crate::domain::record::{ArchiveTimeStampChain, ProtectedData};
use crate::domain::report::{NodePath, NodeReport, SubIndication, ValidationReport};
use crate::services::archive_timestamp::{ArchiveTimeStampValidator, TimeStampNodeInput};
use crate::services::context::ValidationContext;
use crate::services::coverage::{CoverageMode, DigestsToCover};

pub struct ChainValidator;

impl ChainValidator {
    /// Validate one chain. `running_hash` is the digest over the serialized
    /// prior chains when this chain opens an algorithm-renewal era;
    /// `previous_chain_token` is the raw token content of the preceding
    /// chain's final node, used as a hash-source hint across the boundary.
    pub fn validate(
        ctx: &ValidationContext<'_>,
        chain: &ArchiveTimeStampChain,
        chain_index: usize,
        protected: &ProtectedData,
        running_hash: Option<&DigestValue>,
        previous_chain_token: Option<&[u8]>,
        report: &mut ValidationReport,
    ) {
        let chain_path = NodePath::record().sequence().chain(chain_index);

        if chain.is_empty() {
            report.push(NodeReport::invalid(
                chain_path,
                SubIndication::InvalidFormat,
                "archive time-stamp chain must contain at least one time-stamp",
            ));
            return;
        }

        log::debug!(
            "validating chain {chain_index} with {} time-stamp(s)",
            chain.len()
        );

        let mut previous_algorithm = None;
        let mut previous_token: Option<&[u8]> = None;

        for (node_index, node) in chain.time_stamps().iter().enumerate() {
            let path = chain_path.time_stamp(node_index);
            let algorithm = node.algorithm();

            let digests_to_cover = match previous_token {
                // Renewal within the chain: cover the preceding token.
                Some(prev) => {
                    let mut required = BTreeMap::new();
                    required.insert(
                        REF_PREVIOUS_TIME_STAMP.to_string(),
                        DigestValue::of(algorithm, prev),
                    );
                    DigestsToCover::fixed(required, ctx.policy.reject_extra_digests)
                }
                // First node of the chain.
                None => match running_hash {
                    Some(hash) => Self::rehashed_to_cover(ctx, protected, hash, algorithm),
                    None => DigestsToCover::fixed(
                        protected
                            .objects()
                            .iter()
                            .map(|o| (o.reference().to_string(), o.digest().clone()))
                            .collect(),
                        ctx.policy.reject_extra_digests,
                    ),
                },
            };

            let root_source_hint = match previous_token {
                Some(prev) => Some(prev.to_vec()),
                None => match (previous_chain_token, running_hash) {
                    // Crossing a chain boundary: the pass-through preimage is
                    // the prior chain's final token plus the running hash.
                    (Some(prev), Some(hash)) => {
                        let mut bytes = prev.to_vec();
                        bytes.extend_from_slice(hash.as_slice());
                        Some(bytes)
                    }
                    // Very first node of the very first chain: the sole
                    // protected datum itself, when the caller supplied it.
                    _ => match protected.objects() {
                        [only] => only.content().map(<[u8]>::to_vec),
                        _ => None,
                    },
                },
            };

            ArchiveTimeStampValidator::validate_node(
                ctx,
                TimeStampNodeInput {
                    time_stamp: node,
                    path,
                    secure_date: ctx.secure_date(chain_index, node_index),
                    digests_to_cover,
                    previous_algorithm,
                    root_source_hint,
                },
                report,
            );

            previous_algorithm = Some(algorithm);
            previous_token = Some(node.token().raw_content_bytes());
        }
    }

    /// Digests-to-cover for a renewal chain's opening node: every protected
    /// digest concatenated with the running hash and rehashed under the new
    /// algorithm, built under both concatenation conventions.
    fn rehashed_to_cover(
        ctx: &ValidationContext<'_>,
        protected: &ProtectedData,
        running_hash: &DigestValue,
        algorithm: HashAlgorithm,
    ) -> DigestsToCover {
        let mut unsorted = BTreeMap::new();
        let mut sorted = BTreeMap::new();

        for object in protected.objects() {
            let mut in_order = object.digest().as_slice().to_vec();
            in_order.extend_from_slice(running_hash.as_slice());
            unsorted.insert(
                object.reference().to_string(),
                DigestValue::new(algorithm.compute(&in_order)),
            );

            let mut pair = [object.digest().as_slice(), running_hash.as_slice()];
            pair.sort_unstable();
            let reordered = pair.concat();
            sorted.insert(
                object.reference().to_string(),
                DigestValue::new(algorithm.compute(&reordered)),
            );
        }

        let mode = ctx.policy.rehash_convention;
        let (primary, alternative) = match mode {
            CoverageMode::Sorted => (sorted, unsorted),
            CoverageMode::Unsorted | CoverageMode::Both => (unsorted, sorted),
        };
        DigestsToCover::with_alternative(
            primary,
            alternative,
            mode,
            ctx.policy.reject_extra_digests,
        )
    }
}
