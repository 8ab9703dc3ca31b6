//! `VerifyWorkflow`: high-level facade for validating evidence records.
//!
//! Owns the algorithm catalog and the verification policy so callers hand in
//! only the decoded record and the protected-data digests.

use crate::domain::catalog::AlgorithmCatalog;
use crate::domain::record::{EvidenceRecord, ProtectedData};
use crate::domain::report::ValidationReport;
use crate::services::context::VerificationPolicy;
use crate::services::evidence_record::EvidenceRecordValidator;

/// Orchestrates validation of one evidence record at a time.
pub struct VerifyWorkflow {
    catalog: Box<dyn AlgorithmCatalog>,
    policy: VerificationPolicy,
}

impl VerifyWorkflow {
    #[must_use]
    pub fn new(catalog: Box<dyn AlgorithmCatalog>) -> Self {
        Self {
            catalog,
            policy: VerificationPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: VerificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run validation of `record` against the protected data digests.
    pub fn run(&self, record: &EvidenceRecord, protected: &ProtectedData) -> ValidationReport {
        EvidenceRecordValidator::validate(record, protected, self.catalog.as_ref(), &self.policy)
    }
}
