//! Codec configuration.
//!
//! Both knobs default to the lenient behavior: malformed UUIDs degrade to nil
//! and an absent application id is omitted from encoded output.

use core::str::FromStr;

use thiserror::Error;
use tracing::warn;

/// Environment variable selecting [`UuidParsing`].
pub const UUID_PARSING_ENV: &str = "VAULTACL_UUID_PARSING";

/// Environment variable selecting [`AbsentApplicationId`].
pub const ABSENT_APPLICATION_ID_ENV: &str = "VAULTACL_ABSENT_APPLICATION_ID";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown uuid parsing mode '{0}' (expected 'lenient' or 'strict')")]
    UnknownUuidParsing(String),

    #[error("unknown absent application id mode '{0}' (expected 'omit' or 'empty')")]
    UnknownAbsentApplicationId(String),
}

/// How `tenant_id` / `application_id` strings are turned into UUIDs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UuidParsing {
    /// Malformed values become the nil UUID.
    #[default]
    Lenient,
    /// Malformed values are reported by `try_decode`.
    Strict,
}

impl FromStr for UuidParsing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::UnknownUuidParsing(s.to_string())),
        }
    }
}

/// What encoding writes for an entry without an application id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AbsentApplicationId {
    /// Leave the field out of the raw entry.
    #[default]
    Omit,
    /// Write `application_id: ""`, mirroring how decoding reads an empty string.
    EmitEmpty,
}

impl FromStr for AbsentApplicationId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "empty" => Ok(Self::EmitEmpty),
            _ => Err(ConfigError::UnknownAbsentApplicationId(s.to_string())),
        }
    }
}

/// Codec configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CodecConfig {
    pub uuid_parsing: UuidParsing,
    pub absent_application_id: AbsentApplicationId,
}

impl CodecConfig {
    pub fn with_uuid_parsing(mut self, mode: UuidParsing) -> Self {
        self.uuid_parsing = mode;
        self
    }

    pub fn with_absent_application_id(mut self, mode: AbsentApplicationId) -> Self {
        self.absent_application_id = mode;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep the default; unrecognised values are logged and
    /// also keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CodecConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(UUID_PARSING_ENV) {
            match value.parse::<UuidParsing>() {
                Ok(mode) => config.uuid_parsing = mode,
                Err(err) => warn!(variable = UUID_PARSING_ENV, error = %err, "ignoring codec setting"),
            }
        }

        if let Some(value) = lookup(ABSENT_APPLICATION_ID_ENV) {
            match value.parse::<AbsentApplicationId>() {
                Ok(mode) => config.absent_application_id = mode,
                Err(err) => {
                    warn!(variable = ABSENT_APPLICATION_ID_ENV, error = %err, "ignoring codec setting")
                }
            }
        }

        config
    }
}
