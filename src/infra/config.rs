//! Algorithm catalog configuration management.
//!
//! The catalog of digest-algorithm suitability end-dates is operator
//! maintained data, kept in a TOML file so it can be revised when a standards
//! body moves an algorithm's retirement date. This module loads and saves
//! that file and turns it into the in-memory catalog the validators query.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{AlgorithmSuitability, InMemoryCatalog};
use crate::infra::error::{VerifyError, VerifyResult};

/// One algorithm's entry in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Algorithm name (e.g. "sha256"); parsed case-insensitively.
    pub name: String,

    /// Date until which the algorithm is suitable for hashing.
    /// Absent means no known end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashing_until: Option<DateTime<Utc>>,

    /// Date until which the algorithm is suitable for qualified signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_until: Option<DateTime<Utc>>,
}

/// The catalog file as serialized to TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub algorithm: Vec<CatalogEntry>,
}

impl Default for CatalogFile {
    fn default() -> Self {
        fn date(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
        }
        Self {
            algorithm: vec![
                CatalogEntry {
                    name: "sha1".to_string(),
                    hashing_until: date(2017, 2, 23),
                    signing_until: date(2009, 1, 1),
                },
                CatalogEntry {
                    name: "sha256".to_string(),
                    hashing_until: date(2030, 1, 1),
                    signing_until: date(2030, 1, 1),
                },
                CatalogEntry {
                    name: "sha384".to_string(),
                    hashing_until: date(2035, 1, 1),
                    signing_until: date(2035, 1, 1),
                },
                CatalogEntry {
                    name: "sha512".to_string(),
                    hashing_until: date(2035, 1, 1),
                    signing_until: date(2035, 1, 1),
                },
            ],
        }
    }
}

impl CatalogFile {
    /// Build the queryable catalog, rejecting unknown algorithm names so a
    /// typo in the file surfaces at load time rather than as NOT_SUPPORTED
    /// findings later.
    pub fn to_catalog(&self) -> VerifyResult<InMemoryCatalog> {
        let mut catalog = InMemoryCatalog::new();
        for entry in &self.algorithm {
            let algorithm = entry.name.parse().map_err(|_| {
                VerifyError::ConfigurationError(format!(
                    "catalog entry references unknown algorithm '{}'",
                    entry.name
                ))
            })?;
            catalog.insert(
                algorithm,
                AlgorithmSuitability {
                    hashing_until: entry.hashing_until,
                    signing_until: entry.signing_until,
                },
            );
        }
        Ok(catalog)
    }
}

/// Manager for the catalog file on disk.
pub struct CatalogManager {
    catalog_path: PathBuf,
}

impl CatalogManager {
    /// Create a new catalog manager with the default path.
    pub fn new() -> VerifyResult<Self> {
        let catalog_path = Self::default_catalog_path()?;
        Ok(Self { catalog_path })
    }

    /// Create a catalog manager with a custom path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            catalog_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default catalog file path.
    pub fn default_catalog_path() -> VerifyResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("ers-verifier").join("catalog.toml"))
        } else {
            Ok(PathBuf::from("ers-verifier-catalog.toml"))
        }
    }

    /// Load the catalog file, creating the built-in defaults if it does not exist.
    pub fn load_or_create_default(&self) -> VerifyResult<CatalogFile> {
        if self.catalog_path.exists() {
            self.load()
        } else {
            log::info!(
                "Catalog file not found, creating default: {}",
                self.catalog_path.display()
            );
            let default_catalog = CatalogFile::default();
            self.save(&default_catalog)?;
            Ok(default_catalog)
        }
    }

    /// Load the catalog from file.
    pub fn load(&self) -> VerifyResult<CatalogFile> {
        log::info!("Loading algorithm catalog from: {}", self.catalog_path.display());

        let content = fs::read_to_string(&self.catalog_path).map_err(|e| {
            VerifyError::ConfigurationError(format!(
                "Failed to read catalog file {}: {}",
                self.catalog_path.display(),
                e
            ))
        })?;

        let catalog: CatalogFile = toml::from_str(&content)?;
        log::debug!("Loaded {} catalog entr(ies)", catalog.algorithm.len());
        Ok(catalog)
    }

    /// Save the catalog to file, creating parent directories as needed.
    pub fn save(&self, catalog: &CatalogFile) -> VerifyResult<()> {
        if let Some(parent) = self.catalog_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VerifyError::ConfigurationError(format!(
                    "Failed to create catalog directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(catalog)?;
        fs::write(&self.catalog_path, content).map_err(|e| {
            VerifyError::ConfigurationError(format!(
                "Failed to write catalog file {}: {}",
                self.catalog_path.display(),
                e
            ))
        })?;

        log::info!("Saved algorithm catalog to: {}", self.catalog_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::AlgorithmCatalog;
    use crate::domain::crypto::HashAlgorithm;

    #[test]
    fn default_catalog_covers_supported_algorithms() {
        let catalog = CatalogFile::default().to_catalog().unwrap();
        for algorithm in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert!(catalog.lookup(algorithm).is_some(), "missing {algorithm}");
        }
    }

    #[test]
    fn unknown_algorithm_name_is_a_configuration_error() {
        let file = CatalogFile {
            algorithm: vec![CatalogEntry {
                name: "md5".to_string(),
                hashing_until: None,
                signing_until: None,
            }],
        };
        assert!(matches!(
            file.to_catalog(),
            Err(VerifyError::ConfigurationError(_))
        ));
    }

    #[test]
    fn toml_round_trip_preserves_dates() {
        let original = CatalogFile::default();
        let text = toml::to_string_pretty(&original).unwrap();
        let reparsed: CatalogFile = toml::from_str(&text).unwrap();
        assert_eq!(original.algorithm.len(), reparsed.algorithm.len());
        assert_eq!(
            original.algorithm[0].hashing_until,
            reparsed.algorithm[0].hashing_until
        );
    }
}
