//! Digest coverage matching.
//!
//! Decides whether the first hash-tree level of a time-stamp contains exactly
//! the digests it must cover. Records produced across an algorithm renewal
//! admit two legal concatenation conventions (sorted and unsorted) for the
//! rehashed values; the matcher tolerates a configured convention, an
//! explicit either-is-fine mode, and the lenient case where the data matches
//! the opposite convention in full.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::crypto::DigestValue;
use crate::domain::report::{NodePath, NodeReport, SubIndication, ValidationReport};

/// Which concatenation convention the required digests were built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageMode {
    Sorted,
    Unsorted,
    /// Either convention is acceptable; used when the governing profile does
    /// not pin one down.
    Both,
}

impl CoverageMode {
    /// Human-readable name of the opposite single convention.
    #[must_use]
    fn alternative_name(&self) -> &'static str {
        match self {
            CoverageMode::Sorted => "unsorted",
            CoverageMode::Unsorted => "sorted",
            CoverageMode::Both => "both",
        }
    }
}

impl fmt::Display for CoverageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoverageMode::Sorted => "sorted",
            CoverageMode::Unsorted => "unsorted",
            CoverageMode::Both => "both",
        };
        write!(f, "{s}")
    }
}

/// The digests one time-stamp must cover, keyed by reference name.
///
/// Built fresh per node by the chain and sequence validators; the alternative
/// mapping is present only for the first time-stamp of a chain produced by a
/// rehash event, where the concatenation convention is ambiguous.
#[derive(Debug, Clone)]
pub struct DigestsToCover {
    primary: BTreeMap<String, DigestValue>,
    alternative: Option<BTreeMap<String, DigestValue>>,
    mode: CoverageMode,
    reject_extras: bool,
}

impl DigestsToCover {
    /// A single fixed set of required digests, no convention ambiguity.
    #[must_use]
    pub fn fixed(required: BTreeMap<String, DigestValue>, reject_extras: bool) -> Self {
        Self {
            primary: required,
            alternative: None,
            mode: CoverageMode::Unsorted,
            reject_extras,
        }
    }

    /// Required digests under `mode`, with the opposite convention's mapping
    /// available for the leniency and either-is-fine cases.
    #[must_use]
    pub fn with_alternative(
        primary: BTreeMap<String, DigestValue>,
        alternative: BTreeMap<String, DigestValue>,
        mode: CoverageMode,
        reject_extras: bool,
    ) -> Self {
        Self {
            primary,
            alternative: Some(alternative),
            mode,
            reject_extras,
        }
    }

    #[must_use]
    pub fn primary(&self) -> &BTreeMap<String, DigestValue> {
        &self.primary
    }

    #[must_use]
    pub fn required_count(&self) -> usize {
        self.primary.len()
    }

    #[must_use]
    pub fn mode(&self) -> CoverageMode {
        self.mode
    }
}

/// Matches a time-stamp's actual first-level digests against its
/// `DigestsToCover`, recording findings into the report.
pub struct DigestCoverageMatcher;

impl DigestCoverageMatcher {
    pub fn check(
        to_cover: &DigestsToCover,
        actual: &[DigestValue],
        path: &NodePath,
        report: &mut ValidationReport,
    ) {
        let missing_primary = Self::missing_from(&to_cover.primary, actual);

        match (&to_cover.alternative, to_cover.mode) {
            (Some(alternative), CoverageMode::Both) => {
                // A reference is missing only if absent under both mappings.
                let missing: Vec<&str> = missing_primary
                    .iter()
                    .copied()
                    .filter(|reference| match alternative.get(*reference) {
                        Some(alt_digest) => !actual.contains(alt_digest),
                        None => true,
                    })
                    .collect();
                if !missing.is_empty() {
                    report.push(NodeReport::invalid(
                        path.clone(),
                        SubIndication::HashValueMismatch,
                        format!(
                            "missing digest(s) for reference(s): {} (under either concatenation convention)",
                            missing.join(", ")
                        ),
                    ));
                }
            }
            (Some(alternative), mode) if !missing_primary.is_empty() => {
                let missing_alternative = Self::missing_from(alternative, actual);
                if missing_alternative.is_empty() {
                    // The data fully matches the opposite convention. This is
                    // a configuration/data mismatch, not a structural break,
                    // so it is surfaced without failing the node, and the
                    // extra-digest check is suppressed for this node only.
                    // TODO: confirm against the governing profile document
                    // whether a convention mismatch should hard-fail instead.
                    log::warn!(
                        "{path}: digests match the {} convention although {} was configured",
                        mode.alternative_name(),
                        mode
                    );
                    report.push(NodeReport::indetermined(
                        path.clone(),
                        None,
                        format!(
                            "covered digests match the {} concatenation convention although {} was expected",
                            mode.alternative_name(),
                            mode
                        ),
                    ));
                    return;
                }
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::HashValueMismatch,
                    format!(
                        "missing digest(s) for reference(s): {}",
                        missing_primary.join(", ")
                    ),
                ));
            }
            (None, _) if !missing_primary.is_empty() => {
                report.push(NodeReport::invalid(
                    path.clone(),
                    SubIndication::HashValueMismatch,
                    format!(
                        "missing digest(s) for reference(s): {}",
                        missing_primary.join(", ")
                    ),
                ));
            }
            _ => {}
        }

        if to_cover.reject_extras {
            Self::check_extras(to_cover, actual, path, report);
        }
    }

    /// References whose required digest is absent from `actual`.
    fn missing_from<'a>(
        required: &'a BTreeMap<String, DigestValue>,
        actual: &[DigestValue],
    ) -> Vec<&'a str> {
        required
            .iter()
            .filter(|(_, digest)| !actual.contains(digest))
            .map(|(reference, _)| reference.as_str())
            .collect()
    }

    fn check_extras(
        to_cover: &DigestsToCover,
        actual: &[DigestValue],
        path: &NodePath,
        report: &mut ValidationReport,
    ) {
        let extras: Vec<String> = actual
            .iter()
            .filter(|digest| {
                let in_primary = to_cover.primary.values().any(|d| d == *digest);
                let in_alternative = to_cover
                    .alternative
                    .as_ref()
                    .is_some_and(|alt| alt.values().any(|d| d == *digest));
                !in_primary && !in_alternative
            })
            .map(DigestValue::to_hex)
            .collect();

        if !extras.is_empty() {
            let expected: Vec<&str> = to_cover.primary.keys().map(String::as_str).collect();
            report.push(NodeReport::invalid(
                path.clone(),
                SubIndication::HashValueMismatch,
                format!(
                    "found digest(s) [{}] not expected for this time-stamp; expected reference(s): [{}]",
                    extras.join(", "),
                    expected.join(", ")
                ),
            ));
        }
    }
}
