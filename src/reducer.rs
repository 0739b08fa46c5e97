//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Phase, SPINNER_FRAMES, Viewport};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query actions =====
        Action::QueryInput(ch) => {
            if state.phase != Phase::Typing {
                return DispatchResult::unchanged();
            }
            state.query.push(ch);
            DispatchResult::changed()
        }

        Action::QueryBackspace => {
            if state.phase == Phase::Typing && state.query.pop().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::QuerySubmit => {
            if state.phase != Phase::Typing {
                return DispatchResult::unchanged();
            }
            let query = state.query.trim();
            if query.is_empty() {
                return DispatchResult::unchanged();
            }
            let query = query.to_string();

            state.phase = Phase::Loading;
            state.last_result = None;
            state.last_error = None;
            state.spinner_frame = 0;
            state.fetch_generation = state.fetch_generation.wrapping_add(1);
            DispatchResult::changed_with(Effect::FetchWeather {
                query,
                generation: state.fetch_generation,
            })
        }

        Action::QueryReset => {
            if !state.phase.is_outcome() {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Typing;
            state.query.clear();
            state.last_result = None;
            state.last_error = None;
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad {
            generation,
            reading,
        } => {
            if !awaiting(state, generation) {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Result;
            state.last_result = Some(reading);
            state.last_error = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError { generation, error } => {
            if !awaiting(state, generation) {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Error;
            state.last_result = None;
            state.last_error = Some(error);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiResize(width, height) => {
            let viewport = Viewport::new(width, height);
            if state.viewport == viewport {
                return DispatchResult::unchanged();
            }
            state.viewport = viewport;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.phase != Phase::Loading {
                return DispatchResult::unchanged();
            }
            state.spinner_frame = (state.spinner_frame + 1) % SPINNER_FRAMES.len();
            DispatchResult::changed()
        }

        Action::Quit => {
            if state.phase == Phase::Terminated {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Terminated;
            DispatchResult::changed()
        }
    }
}

/// A completion only counts for the fetch that is still pending.
fn awaiting(state: &AppState, generation: u64) -> bool {
    state.phase == Phase::Loading && state.fetch_generation == generation
}
