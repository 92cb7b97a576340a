use std::{env, path::Path, path::PathBuf};

const CONFIG_FILE: &str = ".hf-tagger.toml";

/// Load config file content from CWD first, then home directory
///
/// Searches for .hf-tagger.toml in:
/// 1. Current working directory
/// 2. Home directory
/// 3. `config.toml` in the XDG config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Some(content) = load_config_from(Path::new(CONFIG_FILE)) {
        return Some(content);
    }

    if let Some(content) = get_home_config_path().and_then(|path| load_config_from(&path)) {
        return Some(content);
    }

    crate::paths::app_config_path()
        .ok()
        .and_then(|path| load_config_from(&path))
}

/// Load config file content from an explicit path
pub fn load_config_from(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::debug!("No config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Get the path to the config file in the home directory
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
