//! Algorithm suitability checking against the catalog.
//!
//! The same algorithm can be fine at one point of an archive's timeline and
//! broken at a later one, so suitability is evaluated freshly per query date
//! rather than once per record.

use crate::domain::catalog::{AlgorithmCatalog, AlgorithmUsage};
use crate::domain::report::{NodePath, NodeReport, SubIndication, ValidationReport};

/// Outcome of a single suitability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitabilityStatus {
    Valid,
    /// The catalog does not know the algorithm at all.
    NotSupported,
    /// The catalog knows the algorithm but its end-date is not strictly
    /// after the query date.
    NotSuitable,
}

pub struct AlgorithmSuitabilityValidator;

impl AlgorithmSuitabilityValidator {
    #[must_use]
    pub fn check(usage: &AlgorithmUsage, catalog: &dyn AlgorithmCatalog) -> SuitabilityStatus {
        match catalog.lookup(usage.algorithm) {
            None => SuitabilityStatus::NotSupported,
            Some(entry) => match entry.end_date(usage.kind) {
                None => SuitabilityStatus::Valid,
                Some(end) if end > usage.as_of => SuitabilityStatus::Valid,
                Some(_) => SuitabilityStatus::NotSuitable,
            },
        }
    }

    /// Run the check and record any finding against `path`.
    pub fn report_into(
        usage: &AlgorithmUsage,
        catalog: &dyn AlgorithmCatalog,
        path: NodePath,
        report: &mut ValidationReport,
    ) {
        match Self::check(usage, catalog) {
            SuitabilityStatus::Valid => {}
            SuitabilityStatus::NotSupported => {
                report.push(NodeReport::indetermined(
                    path,
                    Some(SubIndication::NotSupported),
                    format!(
                        "digest algorithm {} is unknown to the algorithm catalog",
                        usage.algorithm
                    ),
                ));
            }
            SuitabilityStatus::NotSuitable => {
                report.push(NodeReport::invalid(
                    path,
                    SubIndication::NotSuitable,
                    format!(
                        "digest algorithm {} is no longer suitable for {} as of {}",
                        usage.algorithm, usage.kind, usage.as_of
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AlgorithmSuitability, InMemoryCatalog, UsageKind};
    use crate::domain::crypto::HashAlgorithm;
    use chrono::{TimeZone, Utc};

    fn date(y: i32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn unknown_algorithm_is_not_supported() {
        let catalog = InMemoryCatalog::new();
        let usage = AlgorithmUsage::new(HashAlgorithm::Sha1, date(2010), UsageKind::Hashing);
        assert_eq!(
            AlgorithmSuitabilityValidator::check(&usage, &catalog),
            SuitabilityStatus::NotSupported
        );
    }

    #[test]
    fn end_date_must_be_strictly_after_the_query_date() {
        let catalog = InMemoryCatalog::new().with_entry(
            HashAlgorithm::Sha1,
            AlgorithmSuitability {
                hashing_until: Some(date(2017)),
                signing_until: Some(date(2009)),
            },
        );

        let before = AlgorithmUsage::new(HashAlgorithm::Sha1, date(2016), UsageKind::Hashing);
        assert_eq!(
            AlgorithmSuitabilityValidator::check(&before, &catalog),
            SuitabilityStatus::Valid
        );

        // Exactly at the end-date: no longer suitable.
        let at = AlgorithmUsage::new(HashAlgorithm::Sha1, date(2017), UsageKind::Hashing);
        assert_eq!(
            AlgorithmSuitabilityValidator::check(&at, &catalog),
            SuitabilityStatus::NotSuitable
        );

        let signing = AlgorithmUsage::new(HashAlgorithm::Sha1, date(2016), UsageKind::QualifiedSigning);
        assert_eq!(
            AlgorithmSuitabilityValidator::check(&signing, &catalog),
            SuitabilityStatus::NotSuitable
        );
    }

    #[test]
    fn open_ended_entry_is_always_suitable() {
        let catalog = InMemoryCatalog::new()
            .with_entry(HashAlgorithm::Sha512, AlgorithmSuitability::default());
        let usage = AlgorithmUsage::new(HashAlgorithm::Sha512, date(2100), UsageKind::Hashing);
        assert_eq!(
            AlgorithmSuitabilityValidator::check(&usage, &catalog),
            SuitabilityStatus::Valid
        );
    }
}
