//! OpenWeatherMap client

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::state::WeatherReading;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a lookup produced no reading
#[derive(
    thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
    /// Message reported by the provider itself, shown verbatim
    #[error("{0}")]
    Provider(String),
}

/// One lookup attempt: a complete reading or a failure, never partial
pub type FetchOutcome = Result<WeatherReading, FetchError>;

// ============================================================================
// Response decoding
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    main: Option<MainBlock>,
    /// Present on error bodies, e.g. `{"cod":"404","message":"city not found"}`
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

/// Normalize a response body into an outcome.
///
/// A non-empty string `message` always means failure, even if the rest of
/// the body looks like a reading.
pub fn parse_reading(body: &str) -> FetchOutcome {
    let data: WeatherResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(message) = data.message.as_ref().and_then(|m| m.as_str()) {
        let message = message.trim();
        if !message.is_empty() {
            return Err(FetchError::Provider(message.to_string()));
        }
    }

    match (data.name, data.main) {
        (Some(location), Some(main)) => Ok(WeatherReading {
            location,
            temperature_c: main.temp,
        }),
        (None, _) => Err(FetchError::Decode("missing field `name`".into())),
        (_, None) => Err(FetchError::Decode("missing field `main`".into())),
    }
}

// ============================================================================
// Client
// ============================================================================

/// Shared HTTP client; cheap to clone into tasks
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the GET request for a query without sending it
    pub fn request(&self, query: &str) -> reqwest::Result<reqwest::Request> {
        self.http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .build()
    }

    /// Look up the current weather for `query`. Exactly one outcome, no retries.
    pub async fn fetch(&self, query: &str) -> FetchOutcome {
        let request = self.request(query).map_err(network_error)?;
        let response = self.http.execute(request).await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        match parse_reading(&body) {
            Err(FetchError::Decode(_)) if !status.is_success() => Err(FetchError::Provider(
                format!("unexpected response status {status}"),
            )),
            outcome => outcome,
        }
    }
}

/// The request URL carries the API key, so it never reaches the message
fn network_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        return FetchError::Network("request timed out".into());
    }
    FetchError::Network(e.without_url().to_string())
}
