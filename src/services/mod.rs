//! Service layer module root.
//! Contains the stateless validation services and their per-run context.

pub mod archive_timestamp;
pub mod chain;
pub mod context;
pub mod coverage;
pub mod evidence_record;
pub mod hash_tree;
pub mod sequence;
pub mod suitability;

pub use archive_timestamp::{ArchiveTimeStampValidator, TimeStampNodeInput};
pub use chain::ChainValidator;
pub use context::{ValidationContext, VerificationPolicy};
pub use coverage::{CoverageMode, DigestCoverageMatcher, DigestsToCover};
pub use evidence_record::EvidenceRecordValidator;
pub use hash_tree::{HashTreeFailure, HashTreeReconstructor, ResolvedRoot};
pub use sequence::{SequenceOutcome, SequenceValidator};
pub use suitability::{AlgorithmSuitabilityValidator, SuitabilityStatus};
