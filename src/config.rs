// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode limits.
//!
//! A length prefix is read straight off the wire, so a corrupt or hostile
//! buffer can claim billions of elements. [`DecodeLimits`] bounds what the
//! decoder will accept before it even checks the remaining bytes.
//!
//! ## Configuration Sources
//! - TOML files via [`DecodeLimits::from_file`]
//! - Environment variables via [`DecodeLimits::from_env`]
//! - Direct instantiation with defaults

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default maximum element count of a single array.
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 10_000_000;

/// Default maximum byte length of a single string (100 MiB).
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024;

/// Nesting ceiling shared by every codec path. `max_depth` may lower it but
/// not raise it.
pub const MAX_DEPTH: usize = 32;

/// Default maximum nesting depth of messages.
pub const DEFAULT_MAX_DEPTH: usize = MAX_DEPTH;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("max_depth {value} exceeds the nesting ceiling of {ceiling}")]
    DepthAboveCeiling { value: usize, ceiling: usize },
}

/// Limits applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Largest accepted array element count
    pub max_array_length: usize,
    /// Largest accepted string byte length
    pub max_string_length: usize,
    /// Deepest accepted message nesting
    pub max_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Top-level TOML layout: limits live under a `[decode]` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    decode: DecodeLimits,
}

impl DecodeLimits {
    /// Load limits from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load limits from a TOML string.
    ///
    /// ```toml
    /// [decode]
    /// max_array_length = 1000
    /// max_depth = 8
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.decode.validate()?;
        Ok(file.decode)
    }

    /// Start from defaults and apply `ROSWIRE_*` environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `ROSWIRE_MAX_ARRAY_LENGTH`, `ROSWIRE_MAX_STRING_LENGTH` and
    /// `ROSWIRE_MAX_DEPTH` on top of these limits.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        fn read(name: &'static str) -> Result<Option<usize>, ConfigError> {
            match std::env::var(name) {
                Ok(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidEnv { name, value }),
                Err(_) => Ok(None),
            }
        }

        if let Some(v) = read("ROSWIRE_MAX_ARRAY_LENGTH")? {
            self.max_array_length = v;
        }
        if let Some(v) = read("ROSWIRE_MAX_STRING_LENGTH")? {
            self.max_string_length = v;
        }
        if let Some(v) = read("ROSWIRE_MAX_DEPTH")? {
            self.max_depth = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject a zero `max_depth` or one above [`MAX_DEPTH`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Zero("max_depth"));
        }
        if self.max_depth > MAX_DEPTH {
            return Err(ConfigError::DepthAboveCeiling {
                value: self.max_depth,
                ceiling: MAX_DEPTH,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = DecodeLimits::default();
        assert_eq!(limits.max_array_length, DEFAULT_MAX_ARRAY_LENGTH);
        assert_eq!(limits.max_string_length, DEFAULT_MAX_STRING_LENGTH);
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_toml_partial() {
        let limits = DecodeLimits::from_toml("[decode]\nmax_array_length = 16\n").unwrap();
        assert_eq!(limits.max_array_length, 16);
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        assert_eq!(DecodeLimits::from_toml("").unwrap(), DecodeLimits::default());
    }

    #[test]
    fn test_from_toml_rejects_zero_depth() {
        let err = DecodeLimits::from_toml("[decode]\nmax_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Zero("max_depth")));
    }

    #[test]
    fn test_depth_above_ceiling_is_rejected() {
        let err = DecodeLimits::from_toml("[decode]\nmax_depth = 64\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DepthAboveCeiling {
                value: 64,
                ceiling: MAX_DEPTH
            }
        ));
        assert!(DecodeLimits::from_toml("[decode]\nmax_depth = 8\n").is_ok());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            DecodeLimits::from_toml("[decode]\nmax_depth = \"deep\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = DecodeLimits::from_file("/nonexistent/roswire.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
