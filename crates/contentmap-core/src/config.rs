//! Mapper options
//!
//! Options are loaded from, in increasing precedence:
//! - Default values
//! - A JSON configuration file or string
//! - Environment variables (`CONTENTMAP_*`)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`MapperOptions::enable_attribute_mapping`]
pub const ENV_ENABLE_ATTRIBUTE_MAPPING: &str = "CONTENTMAP_ENABLE_ATTRIBUTE_MAPPING";
/// Environment variable overriding [`MapperOptions::enable_property_cache`]
pub const ENV_ENABLE_PROPERTY_CACHE: &str = "CONTENTMAP_ENABLE_PROPERTY_CACHE";
/// Environment variable overriding [`MapperOptions::auto_map_unmatched_properties`]
pub const ENV_AUTO_MAP_UNMATCHED: &str = "CONTENTMAP_AUTO_MAP_UNMATCHED";
/// Environment variable overriding [`MapperOptions::use_conversion_registry`]
pub const ENV_USE_CONVERSION_REGISTRY: &str = "CONTENTMAP_USE_CONVERSION_REGISTRY";

/// Behavior switches shared by all mappers built from one factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapperOptions {
    /// Honor the model's eligibility descriptor
    pub enable_attribute_mapping: bool,

    /// Memoize writable-member lists per model type
    pub enable_property_cache: bool,

    /// Look up members without an explicit mapping by their lower-cased name
    pub auto_map_unmatched_properties: bool,

    /// Let the value converter fall back to the conversion registry
    pub use_conversion_registry: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            enable_attribute_mapping: true,
            enable_property_cache: true,
            auto_map_unmatched_properties: true,
            use_conversion_registry: false,
        }
    }
}

impl MapperOptions {
    /// Parse options from a JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("Failed to read mapper options from {}: {}", path.display(), e),
            source: e,
        })?;
        log::debug!("Loaded mapper options from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `CONTENTMAP_*` environment overrides on top of these options
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut bool); 4] = [
            (ENV_ENABLE_ATTRIBUTE_MAPPING, &mut self.enable_attribute_mapping),
            (ENV_ENABLE_PROPERTY_CACHE, &mut self.enable_property_cache),
            (ENV_AUTO_MAP_UNMATCHED, &mut self.auto_map_unmatched_properties),
            (ENV_USE_CONVERSION_REGISTRY, &mut self.use_conversion_registry),
        ];

        for (key, target) in targets {
            if let Some(raw) = lookup(key) {
                *target = parse_flag(key, &raw)?;
            }
        }

        Ok(self)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Configuration {
            message: format!("Invalid value for {}", key),
            validation_errors: vec![format!("'{}' is not a boolean flag", other)],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = MapperOptions::default();
        assert!(options.enable_attribute_mapping);
        assert!(options.enable_property_cache);
        assert!(options.auto_map_unmatched_properties);
        assert!(!options.use_conversion_registry);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = MapperOptions::from_json_str(r#"{"enablePropertyCache": false}"#).unwrap();
        assert!(!options.enable_property_cache);
        assert!(options.enable_attribute_mapping);
    }

    #[test]
    fn test_invalid_json() {
        let err = MapperOptions::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"useConversionRegistry": true}}"#).unwrap();

        let options = MapperOptions::from_path(file.path()).unwrap();
        assert!(options.use_conversion_registry);
    }

    #[test]
    fn test_missing_file() {
        let err = MapperOptions::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ENABLE_ATTRIBUTE_MAPPING, "off"),
            (ENV_USE_CONVERSION_REGISTRY, "Yes"),
        ]
        .into_iter()
        .collect();

        let options = MapperOptions::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert!(!options.enable_attribute_mapping);
        assert!(options.use_conversion_registry);
        assert!(options.enable_property_cache);
    }

    #[test]
    fn test_invalid_override() {
        let err = MapperOptions::default()
            .with_overrides(|key| (key == ENV_ENABLE_PROPERTY_CACHE).then(|| "maybe".to_string()))
            .unwrap_err();
        match err {
            Error::Configuration { validation_errors, .. } => {
                assert_eq!(validation_errors, vec!["'maybe' is not a boolean flag".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
