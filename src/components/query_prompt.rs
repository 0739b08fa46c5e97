use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph},
};
use tui_dispatch::EventKind;

use super::{Component, is_quit_key};
use crate::action::Action;
use crate::theme::Theme;

pub const PROMPT_TEXT: &str = "Enter the name of location";

/// Text entry for the city name (Typing phase)
#[derive(Default)]
pub struct QueryPrompt;

pub struct QueryPromptProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    pub theme: &'a Theme,
}

impl Component<Action> for QueryPrompt {
    type Props<'a> = QueryPromptProps<'a>;

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
            KeyCode::Enter => Some(Action::QuerySubmit),
            KeyCode::Backspace => Some(Action::QueryBackspace),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::QueryInput(ch))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Question
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Input box
        ])
        .split(area);

        let question = Line::styled(PROMPT_TEXT, props.theme.muted).centered();
        frame.render_widget(Paragraph::new(question), chunks[0]);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(props.theme.border)
            .padding(Padding::horizontal(1));
        let input_area = chunks[2].inner(Margin::new(2, 0));
        let inner = block.inner(input_area);

        let text = Span::styled(props.query, props.theme.input);
        let text_width = text.width() as u16;
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), input_area);

        if props.is_focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + text_width.min(inner.width - 1);
            frame.set_cursor_position((x, inner.y));
        }
    }
}
