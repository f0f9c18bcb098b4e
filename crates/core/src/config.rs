//! Buffer configuration via `ssi.toml`
//!
//! Holds the rendering options used when printing buffers and the limits
//! enforced by the checked constructors. Missing sections and fields fall
//! back to their defaults, so an empty file is a valid configuration.

use crate::error::{Error, Result};
use crate::format::FormatOptions;
use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ssi.toml";

/// Buffer configuration loaded from `ssi.toml`.
///
/// # Example
///
/// ```toml
/// [format]
/// precision = 3
/// delimiter = ", "
///
/// [limits]
/// max_dim = 1024
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsiConfig {
    /// Value rendering
    #[serde(default)]
    pub format: FormatOptions,
    /// Allocation limits
    #[serde(default)]
    pub limits: Limits,
}

impl SsiConfig {
    /// Reject settings that would make every checked constructor fail.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_dim == 0 {
            return Err(Error::Config("limits.max_dim must be > 0".to_string()));
        }
        if self.limits.max_sample_streams == 0 {
            return Err(Error::Config(
                "limits.max_sample_streams must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Commented template that parses to [`SsiConfig::default`].
    pub fn default_toml() -> &'static str {
        r#"# SSI buffer configuration

[format]
# Digits used when rendering values. Integers are zero-padded to this many
# digits, floats print this many decimals (default 6).
# precision = 6

# Separator between values of one row.
delimiter = " "

# Maximum rows written when printing a stream (default: all).
# max_rows = 100

[limits]
# Maximum values per sample.
max_dim = 65536

# Maximum stream payload in bytes (1GB).
max_stream_bytes = 1073741824

# Maximum event payload in bytes (16MB).
max_event_bytes = 16777216

# Maximum parallel streams in one sample.
max_sample_streams = 256
"#
    }

    /// Load, parse and validate the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SsiConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Create `path` from [`Self::default_toml`] unless it already exists.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Write this configuration to `path` as TOML.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
