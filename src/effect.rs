//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up the current weather for an already trimmed query
    FetchWeather { query: String, generation: u64 },
}
