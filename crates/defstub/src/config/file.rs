use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigError, Settings};

pub const CONFIG_FILENAME: &str = "defstub.toml";

/// Walks parent directories from `start` looking for `defstub.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads and parses one settings file. A relative `server.root` is resolved
/// against the file's directory.
pub fn load_config_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings = Settings::from_toml_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(root) = settings.server.root.as_ref()
        && root.is_relative()
        && let Some(dir) = path.parent()
    {
        settings.server.root = Some(dir.join(root));
    }
    Ok(settings)
}

/// Settings for a source file: the explicit file if given, otherwise the
/// nearest `defstub.toml`, otherwise defaults.
pub fn resolve_settings(
    explicit: Option<&Path>,
    source_path: &Path,
) -> Result<(Settings, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(source_path),
    };
    match path {
        Some(path) => {
            debug!("Loading settings from {}", path.display());
            let settings = load_config_file(&path)?;
            Ok((settings, Some(path)))
        },
        None => Ok((Settings::default(), None)),
    }
}
