//! Pipeline configuration.
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! package = "com.example.shared"
//! prefix = "Shared"
//!
//! [source]
//! container = "Api"
//!
//! [wiring]
//! batch_size = 200
//!
//! [wrappers]
//! suffix = "Box"
//! kit = "SharedKit"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error loading a pipeline configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pipeline config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{key}` {message}")]
    Invalid {
        key: &'static str,
        message: &'static str,
    },
}

/// Which declarations the mappers derive from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Simple or qualified name of the one top-level class whose nested
    /// classes are mapped. Unset means every top-level class.
    pub container: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterfacesConfig {
    pub file_name: String,
}

impl Default for InterfacesConfig {
    fn default() -> Self {
        Self {
            file_name: "CommonInterfaces".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImplsConfig {
    pub file_name: String,
}

impl Default for ImplsConfig {
    fn default() -> Self {
        Self {
            file_name: "InstanceGetterImpls".into(),
        }
    }
}

/// Dependency-injection modules registering every instance getter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WiringConfig {
    /// Registrations per module file.
    pub batch_size: usize,
    /// Batch files are `<file_base><i>`, the aggregator is `<file_base>`.
    pub file_base: String,
    /// Batch modules are `<module_base><i>`, the aggregate is `<module_base>`.
    pub module_base: String,
    /// Qualified type of a module value.
    pub module_type: String,
    /// Qualified function that builds a module from its registrations.
    pub module_function: String,
}

impl Default for WiringConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            file_base: "InstanceGettersModule".into(),
            module_base: "instanceGettersModule".into(),
            module_type: "org.koin.core.module.Module".into(),
            module_function: "org.koin.dsl.module".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrappersConfig {
    pub suffix: String,
    /// Base class every wrapper extends.
    pub box_base: String,
    /// Module the derived interfaces are imported from on the wrapper side.
    pub kit: String,
    pub file_name: String,
}

impl Default for WrappersConfig {
    fn default() -> Self {
        Self {
            suffix: "Box".into(),
            box_base: "BoxBase".into(),
            kit: "Kit".into(),
            file_name: "ClassBoxes".into(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Package of every generated file.
    pub package: String,
    /// Prepended to a class name to name its derived interface.
    pub prefix: String,
    pub source: SourceConfig,
    pub interfaces: InterfacesConfig,
    pub impls: ImplsConfig,
    pub wiring: WiringConfig,
    pub wrappers: WrappersConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            package: "crossgen.generated".into(),
            prefix: "Common".into(),
            source: SourceConfig::default(),
            interfaces: InterfacesConfig::default(),
            impls: ImplsConfig::default(),
            wiring: WiringConfig::default(),
            wrappers: WrappersConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no pipeline config, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), "loaded pipeline config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("wiring.file_base", &self.wiring.file_base),
            ("wiring.module_base", &self.wiring.module_base),
            ("wiring.module_type", &self.wiring.module_type),
            ("wiring.module_function", &self.wiring.module_function),
            ("interfaces.file_name", &self.interfaces.file_name),
            ("impls.file_name", &self.impls.file_name),
            ("wrappers.file_name", &self.wrappers.file_name),
        ];
        if let Some(&(key, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::Invalid {
                key,
                message: "must not be empty",
            });
        }
        if self.wiring.batch_size == 0 {
            return Err(ConfigError::Invalid {
                key: "wiring.batch_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// `<package>.<name>`, or `name` alone when the package is empty.
    pub(crate) fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.package)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(PipelineConfig::parse("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn sections_override_only_their_keys() {
        let config = PipelineConfig::parse(
            "prefix = \"Td\"\n\n[wiring]\nbatch_size = 3\n\n[source]\ncontainer = \"TdApi\"\n",
        )
        .unwrap();
        assert_eq!(config.prefix, "Td");
        assert_eq!(config.package, "crossgen.generated");
        assert_eq!(config.wiring.batch_size, 3);
        assert_eq!(config.wiring.file_base, "InstanceGettersModule");
        assert_eq!(config.source.container.as_deref(), Some("TdApi"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = PipelineConfig::parse("[wiring]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "wiring.batch_size",
                ..
            }
        ));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = PipelineConfig::parse("prefix = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn qualify_skips_empty_package() {
        let mut config = PipelineConfig::default();
        assert_eq!(config.qualify("A"), "crossgen.generated.A");
        config.package.clear();
        assert_eq!(config.qualify("A"), "A");
    }
}
