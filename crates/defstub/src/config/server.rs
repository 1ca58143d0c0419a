use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;

pub const DEFAULT_SERVER_COMMAND: &str = "clangd";
pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub enable: bool,
    pub command: String,
    pub args: Vec<String>,
    /// Per-request timeout for the language server.
    pub timeout_ms: u64,
    /// Workspace root announced to the server.
    pub root: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            enable: true,
            command: DEFAULT_SERVER_COMMAND.to_string(),
            args: Vec::new(),
            timeout_ms: 5000,
            root: None,
        }
    }
}

impl ServerSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.command {
            self.command = v;
        }
        if let Some(v) = patch.args {
            self.args = v;
        }
        if let Some(v) = patch.timeout_ms {
            self.timeout_ms = v;
        }
        if let Some(v) = patch.root {
            self.root = Some(v);
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.command = self.command.trim().to_string();
        if self.command.is_empty() {
            self.command = DEFAULT_SERVER_COMMAND.to_string();
        }
        self.args = self.args.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
        self.timeout_ms = self.timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        if self.root.as_ref().is_some_and(|root| root.as_os_str().is_empty()) {
            self.root = None;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct ServerSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) command: Option<String>,
    pub(crate) args: Option<Vec<String>>,
    pub(crate) timeout_ms: Option<u64>,
    pub(crate) root: Option<PathBuf>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
