use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE_NAME: &str = "touristguide.toml";
const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_SESSION_DIR: &str = ".touristguide";

const ENV_NAME_API_URL: &str = "API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_url: String,
    /// Directory holding the persisted session document.
    pub session_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_url: Option<String>,
    session_dir: Option<PathBuf>,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config: RawConfig = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(RawConfig::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::from(raw_config);
        if let Ok(api_url) = env::var(ENV_NAME_API_URL) {
            cfg.api_url = api_url;
        }
        cfg.api_url = cfg.api_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let RawConfig {
            api_url,
            session_dir,
        } = raw;
        Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session_dir: session_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = Config::from(RawConfig::default());
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.session_dir, PathBuf::from(DEFAULT_SESSION_DIR));
    }

    #[test]
    fn load_config_file_and_strip_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("touristguide.toml");
        fs::write(
            &path,
            r#"
            api_url = "https://guide.example.com/api/"
            session_dir = "/tmp/tg-session"
            "#,
        )
        .unwrap();
        let cfg = Config::try_load_from_file_or_default(Some(&path)).unwrap();
        assert_eq!(cfg.session_dir, PathBuf::from("/tmp/tg-session"));
        if env::var(ENV_NAME_API_URL).is_err() {
            assert_eq!(cfg.api_url, "https://guide.example.com/api");
        }
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        let cfg = Config::try_load_from_file_or_default(Some(&path)).unwrap();
        assert_eq!(cfg.session_dir, PathBuf::from(DEFAULT_SESSION_DIR));
    }
}
