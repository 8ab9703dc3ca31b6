//! Sequence validation: chains across algorithm-renewal events.
//!
//! Assigns every archive time-stamp its secure date (the signing time of the
//! next time-stamp in global chronological order, or the present for the
//! final one), computes the running hash handed into each renewal chain, and
//! walks the chains in order.

use chrono::{DateTime, Utc};

use crate::domain::crypto::DigestValue;
use crate::domain::record::{ArchiveTimeStampSequence, ProtectedData};
use crate::domain::report::ValidationReport;
use crate::services::chain::ChainValidator;
use crate::services::context::ValidationContext;

/// What the sequence walk established beyond per-node findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceOutcome {
    /// Earliest time-stamp anchor: the data is proven to have existed no
    /// later than this date. `None` for an empty sequence.
    pub proven_existence_time: Option<DateTime<Utc>>,
}

pub struct SequenceValidator;

impl SequenceValidator {
    /// Forward pass assigning each node its secure date.
    ///
    /// Nodes are ordered by signing time (ties keep traversal order); each
    /// node's secure date is its successor's signing time, and the last
    /// node's is `now`. A node whose signing time is not strictly before its
    /// secure date will fail the chronology check.
    #[must_use]
    pub fn assign_secure_dates(
        sequence: &ArchiveTimeStampSequence,
        now: DateTime<Utc>,
    ) -> Vec<Vec<DateTime<Utc>>> {
        let mut coordinates: Vec<(usize, usize, DateTime<Utc>)> = Vec::new();
        for (chain_index, chain) in sequence.chains().iter().enumerate() {
            for (node_index, node) in chain.time_stamps().iter().enumerate() {
                coordinates.push((chain_index, node_index, node.token().signing_time()));
            }
        }
        coordinates.sort_by_key(|&(chain, node, time)| (time, chain, node));

        let mut secure_dates: Vec<Vec<DateTime<Utc>>> = sequence
            .chains()
            .iter()
            .map(|chain| vec![now; chain.len()])
            .collect();
        for window in coordinates.windows(2) {
            let (chain, node, _) = window[0];
            let (_, _, successor_time) = window[1];
            secure_dates[chain][node] = successor_time;
        }
        secure_dates
    }

    /// Walk the chains in order, threading the running hash across
    /// algorithm-renewal boundaries.
    pub fn validate(
        ctx: &ValidationContext<'_>,
        sequence: &ArchiveTimeStampSequence,
        protected: &ProtectedData,
        report: &mut ValidationReport,
    ) -> SequenceOutcome {
        if sequence.is_empty() {
            log::debug!("empty archive time-stamp sequence, nothing to validate");
            return SequenceOutcome {
                proven_existence_time: None,
            };
        }

        let mut previous_chain_token: Option<&[u8]> = None;
        for (chain_index, chain) in sequence.chains().iter().enumerate() {
            // The renewal hash is computed with the algorithm of the opening
            // node of the renewing chain, over the serialized prior chains.
            let running_hash = if chain_index == 0 {
                None
            } else {
                chain.time_stamps().first().map(|node| {
                    DigestValue::new(
                        node.algorithm()
                            .compute(&sequence.truncated_encoding(chain_index)),
                    )
                })
            };

            ChainValidator::validate(
                ctx,
                chain,
                chain_index,
                protected,
                running_hash.as_ref(),
                previous_chain_token,
                report,
            );

            if let Some(last) = chain.time_stamps().last() {
                previous_chain_token = Some(last.token().raw_content_bytes());
            }
        }

        let proven_existence_time = sequence
            .chains()
            .iter()
            .flat_map(|chain| chain.time_stamps())
            .map(|node| node.token().signing_time())
            .min();
        SequenceOutcome {
            proven_existence_time,
        }
    }
}
