//! Resolver configuration
//!
//! Loaded from TOML. Every field has a default, so an empty or missing file
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::candidate_resolver::AmbiguityPolicy;
use crate::errors::{ExError, ResolveError};
use crate::logging_facility::Profile;

/// Default base URL for rendered short links.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default location of the SQLite document store.
pub const DEFAULT_DATABASE: &str = ".pubid/store.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Tie-break for multiple probe hits or scan matches
    pub ambiguity_policy: AmbiguityPolicy,
    /// Whether UUID/short identifiers may fall back to a full scan
    pub fallback_scan: bool,
    /// Origin used when rendering short links
    pub base_url: String,
    pub log_profile: Profile,
    pub database: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ambiguity_policy: AmbiguityPolicy::default(),
            fallback_scan: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            log_profile: Profile::default(),
            database: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl ResolverConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::InvalidConfig` on a syntax error or unknown key.
    pub fn from_toml_str(content: &str) -> Result<Self, ExError> {
        toml::from_str(content).map_err(|e| {
            ExError::from(ResolveError::InvalidConfig {
                reason: e.to_string(),
            })
        })
    }

    /// Load from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// - `ExErrorKind::InvalidConfig` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ExError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ResolveError::InvalidConfig {
                reason: format!("{}: {}", path.display(), e),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_empty_document_is_default() {
        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert!(config.fallback_scan);
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let config = ResolverConfig::from_toml_str(
            r#"
ambiguity_policy = "prefer_published"
fallback_scan = false
base_url = "https://riders.example"
"#,
        )
        .unwrap();
        assert_eq!(config.ambiguity_policy, AmbiguityPolicy::PreferPublished);
        assert!(!config.fallback_scan);
        assert_eq!(config.base_url, "https://riders.example");
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ResolverConfig::from_toml_str("short_code_len = 6").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_unknown_policy_is_rejected_not_defaulted() {
        let err = ResolverConfig::from_toml_str(r#"ambiguity_policy = "loosest""#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);

        let config = ResolverConfig::from_toml_str(r#"ambiguity_policy = "reject""#).unwrap();
        assert_eq!(config.ambiguity_policy, AmbiguityPolicy::Reject);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResolverConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ResolverConfig::default());
    }
}
