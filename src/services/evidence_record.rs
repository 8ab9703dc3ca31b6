//! Top-level evidence-record validation.
//!
//! Binds the record-level declaration checks, the sequence walk, and the
//! algorithm-suitability checks into one aggregate report. The validation
//! targets form a closed set (record, sequence, chain, time-stamp, algorithm
//! usage); dispatch is explicit, so there is no "no validator found" case.

use crate::domain::catalog::{AlgorithmCatalog, AlgorithmUsage, UsageKind};
use crate::domain::record::{EvidenceRecord, ProtectedData};
use crate::domain::report::{NodePath, NodeReport, SubIndication, ValidationReport};
use crate::services::context::{ValidationContext, VerificationPolicy};
use crate::services::sequence::SequenceValidator;
use crate::services::suitability::AlgorithmSuitabilityValidator;

pub struct EvidenceRecordValidator;

impl EvidenceRecordValidator {
    pub fn validate(
        record: &EvidenceRecord,
        protected: &ProtectedData,
        catalog: &dyn AlgorithmCatalog,
        policy: &VerificationPolicy,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let record_path = NodePath::record();

        log::info!(
            "validating evidence record ({} chain(s), {} protected object(s))",
            record.sequence().len(),
            protected.len()
        );

        if !record.has_expected_version() {
            report.push(NodeReport::invalid(
                record_path.clone(),
                SubIndication::InvalidFormat,
                format!("unsupported evidence record version {}", record.version()),
            ));
        }

        if record.digest_algorithms().is_empty() && !record.sequence().is_empty() {
            report.push(NodeReport::invalid(
                record_path.clone(),
                SubIndication::InvalidFormat,
                "evidence record declares no digest algorithm",
            ));
        }

        if policy.strict_profile {
            if record.crypto_info().is_some() {
                report.push(NodeReport::invalid(
                    record_path.clone(),
                    SubIndication::InvalidFormat,
                    "cryptoInfo attributes are not permitted under the strict profile",
                ));
            }
            if record.encryption_info().is_some() {
                report.push(NodeReport::invalid(
                    record_path.clone(),
                    SubIndication::InvalidFormat,
                    "encryptionInfo attributes are not permitted under the strict profile",
                ));
            }
        }

        let secure_dates = SequenceValidator::assign_secure_dates(record.sequence(), policy.current_time);
        let ctx = ValidationContext {
            policy,
            catalog,
            declared_algorithms: record.digest_algorithms(),
            secure_dates,
        };

        // Each declared algorithm must still be suitable at the latest date
        // the record could rely on it.
        let latest_usage = ctx.latest_secure_date();
        for &algorithm in record.digest_algorithms() {
            let usage = AlgorithmUsage::new(algorithm, latest_usage, UsageKind::Hashing);
            AlgorithmSuitabilityValidator::report_into(
                &usage,
                catalog,
                record_path.digest_algorithm(algorithm.as_str()),
                &mut report,
            );
        }

        let outcome = SequenceValidator::validate(&ctx, record.sequence(), protected, &mut report);
        if let Some(proven) = outcome.proven_existence_time {
            log::info!("data proven to have existed no later than {proven}");
            report.set_proven_existence_time(proven);
        }

        log::info!("evidence record validation finished: {}", report.overall());
        report
    }
}
