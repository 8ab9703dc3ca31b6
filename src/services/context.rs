//! Per-run verification policy and context.
//!
//! Every validation run owns one `ValidationContext`; nothing in it is
//! shared across runs, which is what allows a calling layer to validate
//! several evidence records concurrently with the same stateless services.

use chrono::{DateTime, Utc};

use crate::domain::catalog::AlgorithmCatalog;
use crate::domain::crypto::HashAlgorithm;
use crate::services::coverage::CoverageMode;

/// Caller-facing knobs for one verification run.
#[derive(Debug, Clone)]
pub struct VerificationPolicy {
    /// Reject records carrying cryptoInfo/encryptionInfo attribute bags.
    pub strict_profile: bool,
    /// Reject hash-tree levels containing digests no reference accounts for.
    pub reject_extra_digests: bool,
    /// Concatenation convention expected at algorithm-renewal boundaries.
    pub rehash_convention: CoverageMode,
    /// The "now" used as the last time-stamp's secure date. Injectable so
    /// validation stays deterministic under test.
    pub current_time: DateTime<Utc>,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            strict_profile: false,
            reject_extra_digests: false,
            rehash_convention: CoverageMode::Unsorted,
            current_time: Utc::now(),
        }
    }
}

impl VerificationPolicy {
    #[must_use]
    pub fn with_strict_profile(mut self, strict: bool) -> Self {
        self.strict_profile = strict;
        self
    }

    #[must_use]
    pub fn with_reject_extra_digests(mut self, reject: bool) -> Self {
        self.reject_extra_digests = reject;
        self
    }

    #[must_use]
    pub fn with_rehash_convention(mut self, mode: CoverageMode) -> Self {
        self.rehash_convention = mode;
        self
    }

    #[must_use]
    pub fn with_current_time(mut self, time: DateTime<Utc>) -> Self {
        self.current_time = time;
        self
    }
}

/// Transient state of one verification run, threaded by value through the
/// traversal instead of living on the validators.
pub struct ValidationContext<'a> {
    pub policy: &'a VerificationPolicy,
    pub catalog: &'a dyn AlgorithmCatalog,
    pub declared_algorithms: &'a [HashAlgorithm],
    /// Secure date per `[chain][time-stamp]`, assigned by the sequence walk.
    pub secure_dates: Vec<Vec<DateTime<Utc>>>,
}

impl<'a> ValidationContext<'a> {
    /// Secure date assigned to one node; falls back to the policy's current
    /// time for coordinates the assignment pass never saw.
    #[must_use]
    pub fn secure_date(&self, chain: usize, node: usize) -> DateTime<Utc> {
        self.secure_dates
            .get(chain)
            .and_then(|dates| dates.get(node))
            .copied()
            .unwrap_or(self.policy.current_time)
    }

    /// Latest secure date across the whole sequence; the record's
    /// latest-possible-usage date for declared-algorithm checks.
    #[must_use]
    pub fn latest_secure_date(&self) -> DateTime<Utc> {
        self.secure_dates
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(self.policy.current_time)
    }
}
