//! Digest algorithm domain type.
//!
//! Provides the core `HashAlgorithm` enumeration covering the algorithms
//! found in long-term archives: SHA-1 for legacy chains and the SHA-2 family
//! for current ones. Includes OID mapping and digest computation.

use std::fmt;
use std::str::FromStr;

use sha2::Digest;

use crate::domain::constants;
use crate::infra::error::VerifyError;

/// Digest algorithms an evidence record may reference.
///
/// SHA-1 is intentionally supported: old archive time-stamp chains were built
/// with it and must remain verifiable long after the algorithm stopped being
/// suitable for new chains. Suitability over time is judged separately by the
/// algorithm catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Size in bytes of a digest produced by this algorithm.
    #[must_use]
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Dotted object identifier as it appears in decoded records.
    #[must_use]
    pub fn oid(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => constants::OID_SHA1,
            HashAlgorithm::Sha256 => constants::OID_SHA256,
            HashAlgorithm::Sha384 => constants::OID_SHA384,
            HashAlgorithm::Sha512 => constants::OID_SHA512,
        }
    }

    /// Resolve an algorithm from its dotted OID.
    pub fn from_oid(oid: &str) -> Result<Self, VerifyError> {
        match oid {
            constants::OID_SHA1 => Ok(HashAlgorithm::Sha1),
            constants::OID_SHA256 => Ok(HashAlgorithm::Sha256),
            constants::OID_SHA384 => Ok(HashAlgorithm::Sha384),
            constants::OID_SHA512 => Ok(HashAlgorithm::Sha512),
            other => Err(VerifyError::UnsupportedAlgorithm(format!(
                "unknown digest algorithm OID: {other}"
            ))),
        }
    }

    /// Compute the digest of `data` with this algorithm.
    #[must_use]
    pub fn compute(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => sha1::Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => sha2::Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(VerifyError::UnsupportedAlgorithm(format!(
                "unknown digest algorithm name: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_properties() {
        assert_eq!(HashAlgorithm::Sha1.as_str(), "sha1");
        assert_eq!(HashAlgorithm::Sha1.digest_size(), 20);

        assert_eq!(HashAlgorithm::Sha256.as_str(), "sha256");
        assert_eq!(HashAlgorithm::Sha256.digest_size(), 32);

        assert_eq!(HashAlgorithm::Sha384.as_str(), "sha384");
        assert_eq!(HashAlgorithm::Sha384.digest_size(), 48);

        assert_eq!(HashAlgorithm::Sha512.as_str(), "sha512");
        assert_eq!(HashAlgorithm::Sha512.digest_size(), 64);
    }

    #[test]
    fn oid_round_trip() {
        for algo in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(HashAlgorithm::from_oid(algo.oid()).unwrap(), algo);
        }
        assert!(HashAlgorithm::from_oid("1.2.3.4").is_err());
    }

    #[test]
    fn parse_from_common_spellings() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn compute_produces_expected_sizes() {
        let data = b"evidence";
        for algo in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(algo.compute(data).len(), algo.digest_size());
        }
    }
}
