use std::fs;
use std::path::PathBuf;

use crate::model::config::Config;

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/"))
                .join(".config")
        });
    config_dir.join("tarefa").join("config.toml")
}

/// Read the config, falling back to defaults when the file is missing or
/// unparsable. Same degrade-to-default posture as the task file itself.
pub fn read_config() -> Config {
    let content = match fs::read_to_string(config_path()) {
        Ok(c) => c,
        Err(_) => return Config::default(),
    };
    toml::from_str(&content).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_uses_xdg_layout() {
        // Path shape only; env handling is exercised via the default branch
        let path = config_path();
        assert!(path.ends_with("tarefa/config.toml"));
    }
}
