//! Algorithm catalog interface.
//!
//! The catalog answers one question: until when is a digest algorithm
//! suitable for a given usage? The engine queries it per declared algorithm
//! and per time-stamp; the backing data (a maintained config file, a policy
//! service) lives behind the trait.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::crypto::HashAlgorithm;

/// What an algorithm is being used for at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Hashing,
    QualifiedSigning,
}

impl std::fmt::Display for UsageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UsageKind::Hashing => "hashing",
            UsageKind::QualifiedSigning => "qualified signing",
        };
        write!(f, "{s}")
    }
}

/// A single suitability query: is `algorithm` acceptable for `kind` at `as_of`?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmUsage {
    pub algorithm: HashAlgorithm,
    pub as_of: DateTime<Utc>,
    pub kind: UsageKind,
}

impl AlgorithmUsage {
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, as_of: DateTime<Utc>, kind: UsageKind) -> Self {
        Self {
            algorithm,
            as_of,
            kind,
        }
    }
}

/// Per-algorithm suitability end-dates. `None` means no known end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlgorithmSuitability {
    pub hashing_until: Option<DateTime<Utc>>,
    pub signing_until: Option<DateTime<Utc>>,
}

impl AlgorithmSuitability {
    #[must_use]
    pub fn end_date(&self, kind: UsageKind) -> Option<DateTime<Utc>> {
        match kind {
            UsageKind::Hashing => self.hashing_until,
            UsageKind::QualifiedSigning => self.signing_until,
        }
    }
}

/// Lookup interface over the maintained algorithm suitability data.
pub trait AlgorithmCatalog: Send + Sync {
    /// Suitability entry for `algorithm`, or `None` when unknown.
    fn lookup(&self, algorithm: HashAlgorithm) -> Option<AlgorithmSuitability>;

    /// Latest end-date known for `algorithm` across all usages.
    /// `None` when the algorithm is unknown or carries no dated limit.
    fn latest_known_usable_date(&self, algorithm: HashAlgorithm) -> Option<DateTime<Utc>> {
        let entry = self.lookup(algorithm)?;
        match (entry.hashing_until, entry.signing_until) {
            (Some(h), Some(s)) => Some(h.max(s)),
            (Some(h), None) => Some(h),
            (None, Some(s)) => Some(s),
            (None, None) => None,
        }
    }
}

/// Simple map-backed catalog; the config layer builds one from its file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: BTreeMap<HashAlgorithm, AlgorithmSuitability>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, algorithm: HashAlgorithm, entry: AlgorithmSuitability) -> Self {
        self.entries.insert(algorithm, entry);
        self
    }

    pub fn insert(&mut self, algorithm: HashAlgorithm, entry: AlgorithmSuitability) {
        self.entries.insert(algorithm, entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AlgorithmCatalog for InMemoryCatalog {
    fn lookup(&self, algorithm: HashAlgorithm) -> Option<AlgorithmSuitability> {
        self.entries.get(&algorithm).copied()
    }
}
