//! Evidence Record Verifier Library
//!
//! A verification engine for RFC 4998 style evidence records: long-term
//! archival proof structures attesting that a set of data objects existed,
//! unaltered, at specific past points in time. The engine reconstructs
//! reduced hash trees against cryptographically fixed message imprints,
//! chains verification state across time-stamps and algorithm-renewal
//! boundaries, and produces fine-grained per-node diagnostics.
//!
//! Decoding the wire format, verifying a token's signature and certificate
//! chain, and rendering reports are external collaborators; they meet this
//! crate at the data model, the [`TimestampToken`] capability, and the
//! [`ValidationReport`] contract.

pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use domain::catalog::{
    AlgorithmCatalog, AlgorithmSuitability, AlgorithmUsage, InMemoryCatalog, UsageKind,
};
pub use domain::crypto::{DigestValue, HashAlgorithm};
pub use domain::record::{
    ArchiveTimeStamp, ArchiveTimeStampChain, ArchiveTimeStampSequence, Attributes, EvidenceRecord,
    PartialHashTree, ProtectedData, ProtectedDataObject,
};
pub use domain::report::{NodePath, NodeReport, SubIndication, ValidationReport, Verdict};
pub use domain::token::{TimestampToken, TokenVerificationOutcome};
pub use infra::config::{CatalogEntry, CatalogFile, CatalogManager};
pub use infra::error::{VerifyError, VerifyResult};
pub use pipelines::verify::VerifyWorkflow;
pub use services::context::VerificationPolicy;
pub use services::coverage::CoverageMode;
