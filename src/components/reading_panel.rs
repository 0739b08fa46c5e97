use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::{Component, is_quit_key};
use crate::action::Action;
use crate::state::{AppState, Phase};
use crate::theme::Theme;

pub const LOADING_TEXT: &str = "Fetching weather for you";

/// Spinner, result and error layouts (everything after submit)
#[derive(Default)]
pub struct ReadingPanel;

pub struct ReadingPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
    pub theme: &'a Theme,
}

impl Component<Action> for ReadingPanel {
    type Props<'a> = ReadingPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if is_quit_key(key) {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Esc if props.state.phase.is_outcome() => Some(Action::QueryReset),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        let state = props.state;

        match state.phase {
            Phase::Loading => {
                let headline = Line::styled(LOADING_TEXT, theme.muted).centered();
                let value = Line::styled(state.spinner(), theme.input).centered();
                render_boxed(frame, area, theme, headline, value);
            }
            Phase::Result => {
                let Some(reading) = &state.last_result else {
                    return;
                };
                let headline = Line::from(vec![
                    Span::styled("Current Temperature of ", theme.text),
                    Span::styled(reading.location.as_str(), theme.highlight),
                ])
                .centered();
                let value = Line::styled(reading.format_temperature(), theme.input).centered();
                render_boxed(frame, area, theme, headline, value);
            }
            Phase::Error => {
                let Some(error) = &state.last_error else {
                    return;
                };
                let message = Paragraph::new(Line::styled(
                    format!("Could not fetch weather: {error}"),
                    theme.error,
                ))
                .centered()
                .wrap(Wrap { trim: true });
                frame.render_widget(message, area);
            }
            Phase::Typing | Phase::Terminated => {}
        }
    }
}

/// Headline, a blank row, then `value` inside a rounded box
fn render_boxed(frame: &mut Frame, area: Rect, theme: &Theme, headline: Line, value: Line) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(headline), chunks[0]);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border);
    frame.render_widget(
        Paragraph::new(value).block(block),
        chunks[2].inner(Margin::new(2, 0)),
    );
}
