//! Settings for the generate command.
//!
//! Settings are split into one file per category. [`Settings`] aggregates
//! them and handles deserialization of `defstub.toml` through private
//! `*Patch` structs, so every key is optional and unknown keys are ignored.

pub(crate) mod file;
pub(crate) mod logging;
pub(crate) mod output;
pub(crate) mod server;

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::PathBuf,
};

pub use file::{CONFIG_FILENAME, find_config_file, load_config_file, resolve_settings};
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
pub use output::OutputSettings;
use output::OutputSettingsPatch;
use serde::Deserialize;
pub use server::{DEFAULT_SERVER_COMMAND, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, ServerSettings};
use server::ServerSettingsPatch;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let patch: SettingsPatch = toml::from_str(content)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(p) = patch.server {
            self.server.apply_patch(p);
        }
        if let Some(p) = patch.output {
            self.output.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    pub fn normalize(&mut self) {
        self.server.normalize();
        self.output.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct SettingsPatch {
    server: Option<ServerSettingsPatch>,
    output: Option<OutputSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, toml::Value>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Display for ConfigError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read {
                path,
                source,
            } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse {
                path,
                source,
            } => write!(f, "invalid settings in {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read {
                source, ..
            } => Some(source),
            Self::Parse {
                source, ..
            } => Some(source),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
