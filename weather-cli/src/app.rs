use anyhow::Result;
use inquire::{InquireError, Text};
use tracing::debug;
use weather_core::{ServiceError, WeatherRecord, WeatherService};

/// Interactive client over a weather backend: fetches records and renders
/// them as text blocks for the console.
pub struct WeatherApp {
    service: Box<dyn WeatherService>,
}

impl WeatherApp {
    pub fn new(service: Box<dyn WeatherService>) -> Self {
        Self { service }
    }

    /// One-shot: current conditions for a single city.
    pub async fn show_current(&self, city: &str) -> Result<()> {
        match self.service.fetch_current_weather(city).await? {
            Some(record) => println!("{}", format_current(&record)),
            None => println!("City '{city}' not found."),
        }

        Ok(())
    }

    /// One-shot: 5-day forecast for a single city.
    pub async fn show_forecast(&self, city: &str) -> Result<()> {
        let forecast = self.service.fetch_forecast(city).await?;
        if forecast.is_empty() {
            println!("No forecast available for '{city}'.");
        } else {
            println!("{}", format_forecast(&forecast));
        }

        Ok(())
    }

    /// Prompt loop: comma-separated city names per line, "quit" to exit.
    ///
    /// Errors from fetching are reported and the loop continues; a bad city
    /// name never ends the session. Ctrl-C or Esc at the prompt exits
    /// cleanly.
    pub async fn run_interactive(&self) -> Result<()> {
        println!("Enter city names (separated by commas) or 'quit' to exit.");

        loop {
            let line = match Text::new("Cities:").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    println!("Exiting...");
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            let input = line.trim().to_string();
            if input.eq_ignore_ascii_case("quit") {
                println!("Exiting...");
                break;
            }

            if let Err(err) = self.process_line(&input).await {
                match err.downcast_ref::<ServiceError>() {
                    Some(service_err) => println!("Error: {service_err}"),
                    None => println!("Unexpected error: {err}"),
                }
            }
        }

        Ok(())
    }

    /// Fetch and print current weather plus forecast for every city on one
    /// input line, strictly in order. A fetch error abandons the remainder
    /// of the line.
    async fn process_line(&self, input: &str) -> Result<()> {
        for city in split_cities(input) {
            debug!(%city, "fetching weather");
            println!("\nFetching weather for {city}...");

            let report = self.city_report(city).await?;
            println!("{report}");
        }

        Ok(())
    }

    /// The full text report for one city: current conditions (or a
    /// not-found notice) followed by the forecast (or a no-forecast
    /// notice).
    async fn city_report(&self, city: &str) -> Result<String, ServiceError> {
        let mut sections = Vec::new();

        match self.service.fetch_current_weather(city).await? {
            Some(current) => sections.push(format_current(&current)),
            None => sections.push(format!("City '{city}' not found.")),
        }

        let forecast = self.service.fetch_forecast(city).await?;
        if forecast.is_empty() {
            sections.push(format!("No forecast available for '{city}'."));
        } else {
            sections.push(format_forecast(&forecast));
        }

        Ok(sections.join("\n\n"))
    }
}

fn split_cities(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|city| !city.is_empty())
}

/// Fixed-format block for one observation.
pub fn format_current(record: &WeatherRecord) -> String {
    let mut lines = vec![
        format!("Weather for {}:", record.city_name),
        format!("Temperature: {:.1}°C", record.temperature_c),
        format!("Condition: {}", record.condition),
        format!("Humidity: {}%", record.humidity_pct),
        format!("Wind Speed: {:.1} m/s", record.wind_speed_mps),
    ];

    if let Some(timestamp) = record.timestamp {
        lines.push(format!("Time: {} UTC", timestamp.format("%Y-%m-%d %H:%M:%S")));
    }

    lines.join("\n")
}

/// Forecast blocks under a header naming the city, separated by a dash
/// rule. Empty input renders as nothing; callers decide how to announce a
/// missing forecast.
pub fn format_forecast(records: &[WeatherRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let mut out = format!("5-Day Forecast for {}:", first.city_name);
    for record in records {
        out.push('\n');
        out.push_str(&"-".repeat(40));
        out.push('\n');
        out.push_str(&format_current(record));
    }

    out
}
