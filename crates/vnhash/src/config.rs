//! Serializable ring configuration.
//!
//! A ring is described by its replica count and hash algorithm:
//!
//! ```json
//! { "replicas": 200, "hasher": "fnv1" }
//! ```
//!
//! Both fields are optional and default to [`MIN_REPLICAS`] and `xxh3`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hasher::HashAlgorithm;
use crate::ring::{HashRing, MIN_REPLICAS};

/// Settings for constructing a [`HashRing`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Replica count per node (raised to [`MIN_REPLICAS`] when built).
    pub replicas: usize,
    /// Hash algorithm placing positions and keys.
    pub hasher: HashAlgorithm,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: MIN_REPLICAS,
            hasher: HashAlgorithm::default(),
        }
    }
}

impl RingConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Creates an empty ring with these settings.
    pub fn build(&self) -> HashRing<HashAlgorithm> {
        HashRing::with_hasher(self.replicas, self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = RingConfig::from_json("{}").unwrap();
        assert_eq!(config, RingConfig::default());
        assert_eq!(config.replicas, MIN_REPLICAS);
        assert_eq!(config.hasher, HashAlgorithm::Xxh3);
    }

    #[test]
    fn test_parse_full_document() {
        let config = RingConfig::from_json(r#"{ "replicas": 200, "hasher": "sip13" }"#).unwrap();
        assert_eq!(config.replicas, 200);
        assert_eq!(config.hasher, HashAlgorithm::Sip13);

        let ring = config.build();
        assert_eq!(ring.replicas(), 200);
        assert_eq!(ring.hasher_name(), "sip13");
    }

    #[test]
    fn test_build_applies_replica_floor() {
        let config = RingConfig::from_json(r#"{ "replicas": 3 }"#).unwrap();
        assert_eq!(config.build().replicas(), MIN_REPLICAS);
    }

    #[test]
    fn test_rejects_unknown_fields_and_hashers() {
        assert!(matches!(
            RingConfig::from_json(r#"{ "vnodes": 10 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RingConfig::from_json(r#"{ "hasher": "md5" }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_serializes_lowercase_hasher() {
        let config = RingConfig {
            replicas: 128,
            hasher: HashAlgorithm::Fnv1,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"replicas":128,"hasher":"fnv1"}"#);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RingConfig::from_path("/nonexistent/ring.json").unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, Path::new("/nonexistent/ring.json")),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
