pub mod model;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, ServerConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crablet")
        .join("config.toml")
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one, the default location is
/// used if present and defaults apply otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path();
            if !p.exists() {
                return Ok(AppConfig::default());
            }
            p
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("crablet-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_file() {
        let path = scratch_file("ok.toml", "[behavior]\nquit_message = \"ciao\"\n");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.behavior.quit_message, "ciao");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("crablet-does-not-exist.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = scratch_file("bad.toml", "[ui\ncolor = ");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        let _ = std::fs::remove_file(path);
    }
}
