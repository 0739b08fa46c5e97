//! Render tests using RenderHarness
//!
//! One frame per phase of the card, plus viewport and theme handling.

use tui_dispatch::testing::*;
use weather_prompt::{
    api::FetchError,
    components::{Component, WeatherCard, WeatherCardProps},
    state::{AppState, Phase, SPINNER_FRAMES, Viewport, WeatherReading},
    theme::Theme,
};

fn render_card(state: &AppState, theme: &Theme, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut card = WeatherCard::new();
    render.render_to_string_plain(|frame| {
        let props = WeatherCardProps {
            state,
            is_focused: true,
            theme,
        };
        card.render(frame, frame.area(), props);
    })
}

fn loading(spinner_frame: usize) -> AppState {
    AppState {
        phase: Phase::Loading,
        query: "Paris".into(),
        fetch_generation: 1,
        spinner_frame,
        ..Default::default()
    }
}

#[test]
fn test_render_typing_state() {
    let state = AppState::default().with_query("Reykjav");

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(output.contains("Enter the name of location"));
    assert!(
        output.contains("Reykjav"),
        "Query should be echoed:\n{output}"
    );
    assert!(!output.contains("Fetching weather"));
}

#[test]
fn test_render_loading_state() {
    let output = render_card(&loading(0), &Theme::default(), 60, 20);

    assert!(output.contains("Fetching weather for you"));
    assert!(
        output.contains(SPINNER_FRAMES[0]),
        "Spinner should show:\n{output}"
    );
    assert!(!output.contains("Enter the name of location"));
}

#[test]
fn test_spinner_advances_between_frames() {
    let first = render_card(&loading(0), &Theme::default(), 60, 20);
    let second = render_card(&loading(1), &Theme::default(), 60, 20);

    assert_ne!(first, second);
    assert!(second.contains(SPINNER_FRAMES[1]));
}

#[test]
fn test_render_result_state() {
    let state = AppState {
        phase: Phase::Result,
        query: "Paris".into(),
        last_result: Some(WeatherReading::new("Paris", 18.5)),
        ..Default::default()
    };

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(output.contains("Current Temperature of Paris"));
    assert!(
        output.contains("18.5 °C"),
        "Temperature should be visible:\n{output}"
    );
}

#[test]
fn test_render_negative_temperature() {
    let state = AppState {
        phase: Phase::Result,
        last_result: Some(WeatherReading::new("Yakutsk", -38.25)),
        ..Default::default()
    };

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(output.contains("Yakutsk"));
    assert!(
        output.contains("-38.25 °C"),
        "Temperature should not be rounded:\n{output}"
    );
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        phase: Phase::Error,
        query: "Nowhereville".into(),
        last_error: Some(FetchError::Provider("city not found".into())),
        ..Default::default()
    };

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(output.contains("Could not fetch weather"));
    assert!(output.contains("city not found"));
    assert!(!output.contains("°C"));
}

#[test]
fn test_render_network_error() {
    let state = AppState {
        phase: Phase::Error,
        last_error: Some(FetchError::Network("connection refused".into())),
        ..Default::default()
    };

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(
        output.contains("network error"),
        "Error kind should show:\n{output}"
    );
}

#[test]
fn test_help_bar_visible_in_every_phase() {
    let result = AppState {
        phase: Phase::Result,
        last_result: Some(WeatherReading::new("Oslo", 3.0)),
        ..Default::default()
    };

    for state in [AppState::default(), loading(0), result] {
        let output = render_card(&state, &Theme::default(), 60, 20);
        assert!(
            output.contains("search"),
            "Help missing for {:?}",
            state.phase
        );
        assert!(
            output.contains("quit"),
            "Help missing for {:?}",
            state.phase
        );
    }
}

#[test]
fn test_plain_theme_renders_same_text() {
    let state = AppState::default().with_query("Lima");

    let colored = render_card(&state, &Theme::default(), 60, 20);
    let plain = render_card(&state, &Theme::plain(), 60, 20);

    assert_eq!(colored, plain);
}

#[test]
fn test_render_follows_small_viewport() {
    let state = AppState::new(Viewport::new(60, 12)).with_query("Quito");

    let output = render_card(&state, &Theme::default(), 80, 30);

    assert!(output.contains("Quito"));
    assert!(
        output.lines().skip(12).all(|line| line.trim().is_empty()),
        "Nothing should be drawn below the viewport:\n{output}"
    );
}

#[test]
fn test_render_terminated_draws_no_phase_content() {
    let state = AppState {
        phase: Phase::Terminated,
        query: "Paris".into(),
        ..Default::default()
    };

    let output = render_card(&state, &Theme::default(), 60, 20);

    assert!(!output.contains("Enter the name of location"));
    assert!(!output.contains("Paris"));
}
