pub mod query_prompt;
pub mod reading_panel;
pub mod weather_card;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use query_prompt::{QueryPrompt, QueryPromptProps};
pub use reading_panel::{ReadingPanel, ReadingPanelProps};
pub use weather_card::{WeatherCard, WeatherCardProps};

/// `q` or Ctrl+C quit from every phase
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
