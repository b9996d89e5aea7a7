use clap::{Parser, Subcommand};
use weather_core::{Config, OpenWeatherService};

use crate::app::WeatherApp;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "OpenWeatherMap command-line client")]
pub struct Cli {
    /// Without a subcommand the interactive city prompt starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Current {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show the 5-day/3-hour forecast for a city.
    Forecast {
        /// City name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Config::load()?.into_settings()?;
        let service = OpenWeatherService::new(&settings);
        let app = WeatherApp::new(Box::new(service));

        match self.command {
            Some(Command::Current { city }) => app.show_current(&city).await,
            Some(Command::Forecast { city }) => app.show_forecast(&city).await,
            None => app.run_interactive().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_current_subcommand() {
        let cli = Cli::try_parse_from(["weather", "current", "London"]).expect("must parse");
        assert!(matches!(cli.command, Some(Command::Current { city }) if city == "London"));
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).expect("must parse");
        assert!(cli.command.is_none());
    }
}
