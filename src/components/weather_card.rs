use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::widgets::{Block, BorderType, Padding};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, QueryPrompt, QueryPromptProps, ReadingPanel, ReadingPanelProps};
use crate::action::Action;
use crate::state::{AppState, Phase, Viewport};
use crate::theme::Theme;

/// Widest the dialog gets, borders included
pub const CARD_MAX_WIDTH: u16 = 50;
/// Border + padding + five content rows
pub const CARD_HEIGHT: u16 = 9;

/// Props for WeatherCard - read-only view of state
pub struct WeatherCardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
    pub theme: &'a Theme,
}

/// The whole screen: a centered dialog holding the current phase, plus help
#[derive(Default)]
pub struct WeatherCard {
    pub prompt: QueryPrompt,
    pub panel: ReadingPanel,
}

impl WeatherCard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let WeatherCardProps {
            state,
            is_focused,
            theme,
        } = props;

        match state.phase {
            Phase::Typing => self
                .prompt
                .handle_event(
                    event,
                    QueryPromptProps {
                        query: &state.query,
                        is_focused,
                        theme,
                    },
                )
                .into_iter()
                .collect::<Vec<_>>(),
            Phase::Loading | Phase::Result | Phase::Error => self
                .panel
                .handle_event(
                    event,
                    ReadingPanelProps {
                        state,
                        is_focused,
                        theme,
                    },
                )
                .into_iter()
                .collect::<Vec<_>>(),
            Phase::Terminated => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherCardProps<'_>) {
        let WeatherCardProps {
            state,
            is_focused,
            theme,
        } = props;

        let viewport = viewport_area(area, state.viewport);
        let [card_row, _, help_area] = Layout::vertical([
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Help bar
        ])
        .flex(Flex::Center)
        .areas(viewport);
        let [card_area] = Layout::horizontal([Constraint::Length(CARD_MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(card_row);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .padding(Padding::vertical(1));
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);

        match state.phase {
            Phase::Typing => self.prompt.render(
                frame,
                inner,
                QueryPromptProps {
                    query: &state.query,
                    is_focused,
                    theme,
                },
            ),
            Phase::Loading | Phase::Result | Phase::Error => self.panel.render(
                frame,
                inner,
                ReadingPanelProps {
                    state,
                    is_focused,
                    theme,
                },
            ),
            Phase::Terminated => {}
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            help_area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("esc", "new city"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// The part of the frame the last reported terminal size covers
fn viewport_area(area: Rect, viewport: Viewport) -> Rect {
    Rect::new(
        area.x,
        area.y,
        viewport.width.min(area.width),
        viewport.height.min(area.height),
    )
}
