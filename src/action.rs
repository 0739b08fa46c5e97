//! Actions - every event the reducer understands

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query category =====
    /// Append a typed character to the query buffer
    QueryInput(char),

    /// Remove the last character of the query buffer
    QueryBackspace,

    /// Submit the trimmed query (triggers async fetch)
    QuerySubmit,

    /// Back to the prompt from a result or error
    QueryReset,

    // ===== Weather category =====
    /// Result: lookup succeeded
    WeatherDidLoad {
        generation: u64,
        reading: WeatherReading,
    },

    /// Result: lookup failed
    WeatherDidError { generation: u64, error: FetchError },

    // ===== UI category =====
    /// Terminal was resized
    UiResize(u16, u16),

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
