//! Key-driven scenarios: terminal keys → WeatherCard → reducer → render

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, EventKind};
use weather_prompt::{
    action::Action,
    api::FetchError,
    components::{Component, WeatherCard, WeatherCardProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Phase, Viewport, WeatherReading},
    theme::Theme,
};

/// The running app minus the terminal and the network
struct App {
    store: EffectStore<AppState, Action, Effect>,
    card: WeatherCard,
    theme: Theme,
    effects: Vec<Effect>,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            card: WeatherCard::new(),
            theme: Theme::default(),
            effects: Vec::new(),
        }
    }

    fn state(&self) -> &AppState {
        self.store.state()
    }

    fn press(&mut self, code: KeyCode) {
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        let props = WeatherCardProps {
            state: self.store.state(),
            is_focused: true,
            theme: &self.theme,
        };
        let actions: Vec<_> = self
            .card
            .handle_event(&event, props)
            .into_iter()
            .collect();
        for action in actions {
            self.dispatch(action);
        }
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        self.effects.extend(result.effects);
    }

    fn render(&mut self, width: u16, height: u16) -> String {
        let mut render = RenderHarness::new(width, height);
        let App {
            store, card, theme, ..
        } = self;
        render.render_to_string_plain(|frame| {
            let props = WeatherCardProps {
                state: store.state(),
                is_focused: true,
                theme: &*theme,
            };
            card.render(frame, frame.area(), props);
        })
    }
}

#[test]
fn test_typing_accumulates_in_order() {
    let mut app = App::new(AppState::default());

    app.type_text("Buenos Aires");

    assert_eq!(app.state().phase, Phase::Typing);
    assert_eq!(app.state().query, "Buenos Aires");
    assert!(app.effects.is_empty());

    app.press(KeyCode::Backspace);
    assert_eq!(app.state().query, "Buenos Aire");
}

#[test]
fn test_paris_result() {
    let mut app = App::new(AppState::default());

    app.type_text("Paris");
    app.press(KeyCode::Enter);

    assert_eq!(app.state().phase, Phase::Loading);
    assert_eq!(
        app.effects,
        vec![Effect::FetchWeather {
            query: "Paris".into(),
            generation: 1,
        }]
    );

    app.dispatch(Action::WeatherDidLoad {
        generation: 1,
        reading: WeatherReading::new("Paris", 18.5),
    });

    assert_eq!(app.state().phase, Phase::Result);
    let output = app.render(60, 20);
    assert!(
        output.contains("Paris"),
        "City should be visible:\n{output}"
    );
    assert!(
        output.contains("18.5"),
        "Temperature should be visible:\n{output}"
    );
}

#[test]
fn test_nowhereville_error() {
    let mut app = App::new(AppState::default());

    app.type_text("Nowhereville");
    app.press(KeyCode::Enter);
    app.dispatch(Action::WeatherDidError {
        generation: 1,
        error: FetchError::Provider("city not found".into()),
    });

    assert_eq!(app.state().phase, Phase::Error);
    let output = app.render(60, 20);
    assert!(
        output.contains("city not found"),
        "Provider message should be visible:\n{output}"
    );
}

#[test]
fn test_whitespace_only_stays_typing() {
    let mut app = App::new(AppState::default());

    app.type_text("   ");
    app.press(KeyCode::Enter);

    assert_eq!(app.state().phase, Phase::Typing);
    assert!(app.effects.is_empty(), "No fetch should be issued");
}

#[test]
fn test_keys_ignored_while_loading() {
    let mut app = App::new(AppState::default());
    app.type_text("Paris");
    app.press(KeyCode::Enter);

    app.press(KeyCode::Enter);
    app.press(KeyCode::Char('x'));
    app.press(KeyCode::Esc);
    app.press(KeyCode::Backspace);

    assert_eq!(app.state().phase, Phase::Loading);
    assert_eq!(app.state().query, "Paris");
    assert_eq!(app.effects.len(), 1, "Only one fetch may be in flight");
}

#[test]
fn test_esc_from_result_and_error() {
    let mut app = App::new(AppState::default());
    app.type_text("Paris");
    app.press(KeyCode::Enter);
    app.dispatch(Action::WeatherDidLoad {
        generation: 1,
        reading: WeatherReading::new("Paris", 18.5),
    });

    // Typing keys do nothing on the result screen
    app.press(KeyCode::Char('x'));
    app.press(KeyCode::Enter);
    assert_eq!(app.state().phase, Phase::Result);

    app.press(KeyCode::Esc);
    assert_eq!(app.state().phase, Phase::Typing);
    assert!(app.state().query.is_empty());
    assert!(app.state().last_result.is_none());
    assert!(app.state().last_error.is_none());

    app.type_text("Atlantis");
    app.press(KeyCode::Enter);
    app.dispatch(Action::WeatherDidError {
        generation: 2,
        error: FetchError::Network("timed out".into()),
    });
    app.press(KeyCode::Esc);
    assert_eq!(app.state().phase, Phase::Typing);
    assert!(app.state().query.is_empty());
    assert!(app.state().last_error.is_none());
}

#[test]
fn test_q_quits_from_every_phase() {
    let mut typing = App::new(AppState::default());
    typing.press(KeyCode::Char('q'));
    assert_eq!(typing.state().phase, Phase::Terminated);

    let mut loading = App::new(AppState::default());
    loading.type_text("Paris");
    loading.press(KeyCode::Enter);
    loading.press(KeyCode::Char('q'));
    assert_eq!(loading.state().phase, Phase::Terminated);

    let mut failed = App::new(AppState::default());
    failed.type_text("Paris");
    failed.press(KeyCode::Enter);
    failed.dispatch(Action::WeatherDidError {
        generation: 1,
        error: FetchError::Decode("eof".into()),
    });
    failed.press(KeyCode::Char('q'));
    assert_eq!(failed.state().phase, Phase::Terminated);
}

#[test]
fn test_resize_while_loading() {
    let mut app = App::new(AppState::new(Viewport::new(100, 40)));
    app.type_text("Paris");
    app.press(KeyCode::Enter);
    let before = app.render(100, 40);

    app.dispatch(Action::UiResize(80, 24));

    assert_eq!(app.state().phase, Phase::Loading);
    assert_eq!(app.state().viewport, Viewport::new(80, 24));

    let after = app.render(100, 40);
    assert_ne!(before, after, "Layout should follow the new viewport");
    assert!(after.contains("Fetching weather for you"));
    assert!(
        after.lines().skip(24).all(|line| line.trim().is_empty()),
        "Nothing should be drawn below the viewport:\n{after}"
    );
}
