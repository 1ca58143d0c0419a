use std::collections::HashMap;

use serde::Deserialize;

use crate::editor::STDOUT_REGISTER;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// `stdout`, or a file path the stubs are written to.
    pub register: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            register: STDOUT_REGISTER.to_string(),
        }
    }
}

impl OutputSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: OutputSettingsPatch,
    ) {
        if let Some(v) = patch.register {
            self.register = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.register = self.register.trim().to_string();
        if self.register.is_empty() {
            self.register = STDOUT_REGISTER.to_string();
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct OutputSettingsPatch {
    pub(crate) register: Option<String>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
