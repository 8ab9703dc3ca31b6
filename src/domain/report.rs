//! Validation reporting domain types.
//!
//! Aggregates per-node findings into one report per evidence record; every
//! sub-check records its outcome here instead of aborting the run, so a
//! failed node never hides the state of its siblings. This is the stable
//! reporting contract consumed by higher-level workflows and report
//! renderers.

use std::fmt;

use chrono::{DateTime, Utc};

/// Major outcome of a single validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
    Indetermined,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Valid => "VALID",
            Verdict::Invalid => "INVALID",
            Verdict::Indetermined => "INDETERMINED",
        };
        write!(f, "{s}")
    }
}

/// Machine-readable minor reason accompanying a non-passing verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubIndication {
    /// A recomputed hash does not match a fixed value, or a required digest
    /// is missing from (or alien to) a hash-tree level.
    HashValueMismatch,
    /// Structural or declarative inconsistency inside the record itself.
    InvalidFormat,
    /// An algorithm identifier unknown to the catalog.
    NotSupported,
    /// An algorithm known to the catalog but past its suitability end-date.
    NotSuitable,
    /// A time-stamp is not anchored before its secure date.
    OutOfBoundsNoPoe,
    /// A digest computation could not be carried out.
    CryptoConstraintsFailure,
    /// The externally verified time-stamp signature failed.
    SignatureInvalid,
}

impl fmt::Display for SubIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubIndication::HashValueMismatch => "HASH_VALUE_MISMATCH",
            SubIndication::InvalidFormat => "INVALID_FORMAT",
            SubIndication::NotSupported => "NOT_SUPPORTED",
            SubIndication::NotSuitable => "NOT_SUITABLE",
            SubIndication::OutOfBoundsNoPoe => "OUT_OF_BOUNDS_NO_POE",
            SubIndication::CryptoConstraintsFailure => "CRYPTO_CONSTRAINTS_FAILURE",
            SubIndication::SignatureInvalid => "SIGNATURE_INVALID",
        };
        write!(f, "{s}")
    }
}

/// Stable path-like reference to the node a finding applies to,
/// e.g. `evidence-record/sequence/chain[0]/time-stamp[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    #[must_use]
    pub fn record() -> Self {
        Self("evidence-record".to_string())
    }

    #[must_use]
    pub fn digest_algorithm(&self, name: &str) -> Self {
        Self(format!("{}/digest-algorithms[{name}]", self.0))
    }

    #[must_use]
    pub fn sequence(&self) -> Self {
        Self(format!("{}/sequence", self.0))
    }

    #[must_use]
    pub fn chain(&self, index: usize) -> Self {
        Self(format!("{}/chain[{index}]", self.0))
    }

    #[must_use]
    pub fn time_stamp(&self, index: usize) -> Self {
        Self(format!("{}/time-stamp[{index}]", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One finding against one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub path: NodePath,
    pub verdict: Verdict,
    pub sub_indication: Option<SubIndication>,
    pub message: String,
}

impl NodeReport {
    #[must_use]
    pub fn valid(path: NodePath, message: impl Into<String>) -> Self {
        Self {
            path,
            verdict: Verdict::Valid,
            sub_indication: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid(path: NodePath, sub: SubIndication, message: impl Into<String>) -> Self {
        Self {
            path,
            verdict: Verdict::Invalid,
            sub_indication: Some(sub),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn indetermined(
        path: NodePath,
        sub: Option<SubIndication>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            verdict: Verdict::Indetermined,
            sub_indication: sub,
            message: message.into(),
        }
    }
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_indication {
            Some(sub) => write!(f, "{} [{}/{}] {}", self.path, self.verdict, sub, self.message),
            None => write!(f, "{} [{}] {}", self.path, self.verdict, self.message),
        }
    }
}

/// Aggregate report for one validated evidence record.
///
/// Push-only during validation; the overall verdict is a fold where
/// `Invalid` dominates, then `Indetermined`. An empty report is vacuously
/// `Valid` (an empty sequence is legal input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<NodeReport>,
    proven_existence_time: Option<DateTime<Utc>>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: NodeReport) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[NodeReport] {
        &self.entries
    }

    /// All findings recorded against one node path.
    pub fn for_path<'a>(&'a self, path: &'a NodePath) -> impl Iterator<Item = &'a NodeReport> {
        self.entries.iter().filter(move |e| &e.path == path)
    }

    #[must_use]
    pub fn overall(&self) -> Verdict {
        let mut verdict = Verdict::Valid;
        for entry in &self.entries {
            match entry.verdict {
                Verdict::Invalid => return Verdict::Invalid,
                Verdict::Indetermined => verdict = Verdict::Indetermined,
                Verdict::Valid => {}
            }
        }
        verdict
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.overall() == Verdict::Valid
    }

    /// Latest date by which the protected data is proven to have existed,
    /// when the sequence established one.
    #[must_use]
    pub fn proven_existence_time(&self) -> Option<DateTime<Utc>> {
        self.proven_existence_time
    }

    pub fn set_proven_existence_time(&mut self, time: DateTime<Utc>) {
        self.proven_existence_time = Some(time);
    }
}
