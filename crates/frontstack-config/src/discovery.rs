//! Config file discovery

use crate::error::{ConfigError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Env var pointing directly at a config file
pub const CONFIG_ENV: &str = "FRONTSTACK_CONFIG";

const CANDIDATES: [&str; 4] = [
    "frontstack.local.kdl",
    ".frontstack.local.kdl",
    "frontstack.kdl",
    ".frontstack.kdl",
];

/// Find the project's `frontstack.kdl`
///
/// Search order:
/// 1. `FRONTSTACK_CONFIG` (direct path)
/// 2. current directory: frontstack.local.kdl, .frontstack.local.kdl, frontstack.kdl, .frontstack.kdl
/// 3. `./.frontstack/`, same order
/// 4. `~/.config/frontstack/frontstack.kdl` (global)
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            debug!(path = %path.display(), "config file from {}", CONFIG_ENV);
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    let project_dir = current_dir.join(".frontstack");
    if project_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = project_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("frontstack").join("frontstack.kdl");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn in_dir<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = temp_env::with_var_unset(CONFIG_ENV, f);
        std::env::set_current_dir(original_dir).unwrap();
        result
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("frontstack.kdl"), "// test").unwrap();

        let result = in_dir(temp_dir.path(), find_config_file).unwrap();
        assert!(result.ends_with("frontstack.kdl"));
    }

    #[test]
    #[serial]
    fn test_local_file_takes_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("frontstack.kdl"), "// shared").unwrap();
        fs::write(temp_dir.path().join("frontstack.local.kdl"), "// local").unwrap();

        let result = in_dir(temp_dir.path(), find_config_file).unwrap();
        assert!(result.ends_with("frontstack.local.kdl"));
    }

    #[test]
    #[serial]
    fn test_hidden_local_beats_visible_shared() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".frontstack.local.kdl"), "// hidden local").unwrap();
        fs::write(temp_dir.path().join("frontstack.kdl"), "// visible").unwrap();

        let result = in_dir(temp_dir.path(), find_config_file).unwrap();
        assert!(result.ends_with(".frontstack.local.kdl"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_project_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_dir = temp_dir.path().join(".frontstack");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join("frontstack.kdl"), "// in project dir").unwrap();

        let result = in_dir(temp_dir.path(), find_config_file).unwrap();
        assert!(result.ends_with(".frontstack/frontstack.kdl"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.kdl");
        fs::write(&config_path, "// custom").unwrap();

        let result = temp_env::with_var(CONFIG_ENV, Some(&config_path), find_config_file).unwrap();
        assert_eq!(result, config_path);
    }

    #[test]
    #[serial]
    fn test_find_config_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();

        let result = in_dir(temp_dir.path(), find_config_file);
        assert!(matches!(result, Err(ConfigError::ConfigFileNotFound)));
    }
}
