//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;

/// A successful lookup, normalized from the provider response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub location: String,
    pub temperature_c: f64,
}

impl WeatherReading {
    pub fn new(location: impl Into<String>, temperature_c: f64) -> Self {
        Self {
            location: location.into(),
            temperature_c,
        }
    }

    /// The value as the provider returned it, without rounding
    pub fn format_temperature(&self) -> String {
        format!("{} °C", self.temperature_c)
    }
}

/// Which screen the session is on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Phase {
    #[default]
    Typing,
    Loading,
    Result,
    Error,
    Terminated,
}

impl Phase {
    /// Result and Error only show the last outcome
    pub fn is_outcome(self) -> bool {
        matches!(self, Phase::Result | Phase::Error)
    }
}

/// Terminal size as last reported
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Spinner frames for the loading layout (braille dots).
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
pub const SPINNER_TICK_MS: u64 = 100;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Session", label = "Phase", debug_fmt)]
    pub phase: Phase,

    /// Text typed so far (untrimmed)
    #[debug(section = "Session", label = "Query")]
    pub query: String,

    /// Populated only while `phase == Result`
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub last_result: Option<WeatherReading>,

    /// Populated only while `phase == Error`
    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub last_error: Option<FetchError>,

    /// Sequence token of the latest submitted fetch
    #[debug(section = "Weather", label = "Generation")]
    pub fetch_generation: u64,

    #[debug(section = "Terminal", label = "Viewport", debug_fmt)]
    pub viewport: Viewport,

    #[debug(skip)]
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Start in Typing with the buffer pre-filled
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}
