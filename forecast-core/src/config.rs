use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    dotenv::{self, Dotenv},
    error::ConfigError,
};

/// Environment variable (and `.env` key) holding the WeatherAPI.com key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// On-disk configuration file.
///
/// Example TOML:
/// api_key = "..."
#[derive(Debug, Clone, Deserialize, Default)]
struct ConfigFile {
    api_key: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    api_key: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: Some(api_key.into()) }
    }

    /// Resolve configuration from the process environment, `./.env`
    /// and the platform config file, in that order.
    pub fn load() -> Result<Self> {
        let file_path = Self::config_file_path().ok();
        Self::from_sources(
            env::var(API_KEY_VAR).ok(),
            Path::new(dotenv::DEFAULT_FILENAME),
            file_path.as_deref(),
        )
    }

    /// First non-blank key wins. Missing files are skipped; an unreadable file
    /// or a malformed config file is an error. Bad `.env` lines are skipped.
    pub fn from_sources(
        env_value: Option<String>,
        dotenv_path: &Path,
        config_file: Option<&Path>,
    ) -> Result<Self> {
        if let Some(key) = non_blank(env_value) {
            return Ok(Self::new(key));
        }

        let dotenv_key = Dotenv::from_file(dotenv_path)?
            .and_then(|dotenv| non_blank(dotenv.get(API_KEY_VAR).map(str::to_owned)));
        if let Some(key) = dotenv_key {
            return Ok(Self::new(key));
        }

        if let Some(path) = config_file {
            let api_key = read_config_file(path)?.and_then(|cfg| non_blank(cfg.api_key));
            return Ok(Self { api_key });
        }

        Ok(Self::default())
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn read_config_file(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read config file: {}", path.display()));
        }
    };

    let cfg: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(Some(cfg))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Paths {
        _dir: TempDir,
        dotenv: PathBuf,
        config: PathBuf,
    }

    fn paths() -> Paths {
        let dir = tempfile::tempdir().unwrap();
        let dotenv = dir.path().join(".env");
        let config = dir.path().join("config.toml");
        Paths { _dir: dir, dotenv, config }
    }

    impl Paths {
        fn resolve(&self, env_value: Option<&str>) -> Result<Config> {
            let env_value = env_value.map(str::to_owned);
            Config::from_sources(env_value, &self.dotenv, Some(self.config.as_path()))
        }
    }

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("WEATHER_API_KEY"));
    }

    #[test]
    fn environment_wins_over_files() {
        let p = paths();
        fs::write(&p.dotenv, "WEATHER_API_KEY=dotenv-key\n").unwrap();
        fs::write(&p.config, "api_key = \"file-key\"\n").unwrap();

        let cfg = p.resolve(Some("env-key")).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "env-key");
    }

    #[test]
    fn dotenv_used_when_environment_blank() {
        let p = paths();
        fs::write(&p.dotenv, "WEATHER_API_KEY='dotenv-key'\n").unwrap();

        let cfg = p.resolve(Some("  ")).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "dotenv-key");
    }

    #[test]
    fn dotenv_with_stray_line_still_resolves_key() {
        let p = paths();
        fs::write(&p.dotenv, "WEATHER_API_KEY=abc # weatherapi.com\nsome stray note\n").unwrap();

        let cfg = Config::from_sources(None, &p.dotenv, None).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "abc");
    }

    #[test]
    fn config_file_used_as_last_resort() {
        let p = paths();
        fs::write(&p.dotenv, "OTHER=1\n").unwrap();
        fs::write(&p.config, "api_key = \"file-key\"\n").unwrap();

        let cfg = p.resolve(None).unwrap();
        assert_eq!(cfg.api_key().unwrap(), "file-key");
    }

    #[test]
    fn nothing_configured_yields_missing_key() {
        let p = paths();

        let cfg = p.resolve(None).unwrap();
        assert!(matches!(cfg.api_key(), Err(ConfigError::MissingApiKey)));

        let cfg = Config::from_sources(None, &p.dotenv, None).unwrap();
        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let p = paths();
        fs::write(&p.config, "api_key = \n").unwrap();

        let err = p.resolve(None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
