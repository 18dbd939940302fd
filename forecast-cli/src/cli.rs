use anyhow::Result;
use clap::Parser;
use forecast_core::{CITIES, Config, WeatherApiProvider, config::API_KEY_VAR, fetch_all, render};
use tracing::{error, info};

/// Top-level CLI struct. The tool takes no arguments.
#[derive(Debug, Parser)]
#[command(
    name = "forecast",
    version,
    about = "Print tomorrow's weather for Chisinau, Madrid, Kyiv and Amsterdam"
)]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> Result<()> {
        run_with(Config::load()?).await
    }
}

/// Fetch and print the table using an already resolved configuration.
async fn run_with(config: Config) -> Result<()> {
    let api_key = match config.api_key() {
        Ok(key) => key.to_owned(),
        Err(err) => {
            log_setup_hints();
            return Err(err.into());
        }
    };

    let provider = WeatherApiProvider::new(api_key)?;

    info!("Getting tomorrow's weather forecast...");
    let results = fetch_all(&provider, &CITIES).await;

    println!("{}", render(&results));

    Ok(())
}

fn log_setup_hints() {
    error!("{API_KEY_VAR} not found.");
    info!("Setup options:");
    info!("1. Create .env file and add: {API_KEY_VAR}=your_api_key_here");
    info!("2. Set environment variable: export {API_KEY_VAR}='your_api_key_here'");
    if let Ok(path) = Config::config_file_path() {
        info!("3. Add `api_key = \"your_api_key_here\"` to {}", path.display());
    }
    info!("Get API key at: https://www.weatherapi.com/signup.aspx");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use forecast_core::ConfigError;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_no_arguments() {
        assert!(Cli::try_parse_from(["forecast"]).is_ok());
        assert!(Cli::try_parse_from(["forecast", "Paris"]).is_err());
        assert!(Cli::try_parse_from(["forecast", "--city", "Paris"]).is_err());
    }

    #[tokio::test]
    async fn missing_api_key_fails_the_run() {
        let err = run_with(Config::default()).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::MissingApiKey)));
    }
}
