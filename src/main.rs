//! Weather prompt - look up the current temperature of a city

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_prompt::action::Action;
use weather_prompt::api::WeatherClient;
use weather_prompt::components::{
    Component, QueryPromptProps, ReadingPanelProps, WeatherCard, WeatherCardProps,
};
use weather_prompt::config::{Config, Overrides};
use weather_prompt::effect::Effect;
use weather_prompt::reducer::reducer;
use weather_prompt::state::{AppState, Phase, SPINNER_TICK_MS, Viewport};
use weather_prompt::theme::Theme;

/// Look up the current temperature of a city
#[derive(Parser, Debug)]
#[command(name = "weather-prompt")]
#[command(about = "Prompt for a city and show its current temperature")]
struct Args {
    /// City to look up right away instead of starting at the prompt
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Weather endpoint (defaults to OpenWeatherMap current weather)
    #[arg(long, env = "WEATHER_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// TOML config file (defaults to <config dir>/weather-prompt/config.toml)
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Render without colors
    #[arg(long)]
    plain: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Prompt,
    Panel,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Typing,
    Viewing,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        match self.phase {
            Phase::Typing => Some(WeatherComponentId::Prompt),
            Phase::Loading | Phase::Result | Phase::Error => Some(WeatherComponentId::Panel),
            Phase::Terminated => None,
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        None
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Prompt => WeatherContext::Typing,
            WeatherComponentId::Panel => WeatherContext::Viewing,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Typing
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        endpoint,
        timeout,
        config_file,
        plain,
        debug: debug_args,
    } = Args::parse();

    let overrides = Overrides {
        api_key,
        endpoint,
        timeout_secs: timeout,
    };
    let config = match Config::load(overrides, config_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let client = match WeatherClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not create HTTP client.");
            eprintln!("Details: {e}");
            std::process::exit(1);
        }
    };
    let viewport = match crossterm::terminal::size() {
        Ok((width, height)) => Viewport::new(width, height),
        Err(e) => {
            eprintln!("Error: could not determine terminal size.");
            eprintln!("Details: {e}");
            std::process::exit(1);
        }
    };
    let theme = if plain { Theme::plain() } else { Theme::default() };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial_query = city.clone().unwrap_or_default();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(viewport).with_query(initial_query))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let init_action = city.map(|_| Action::QuerySubmit);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        theme,
        init_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct WeatherUi {
    card: WeatherCard,
    theme: Theme,
}

impl WeatherUi {
    fn new(theme: Theme) -> Self {
        Self {
            card: WeatherCard::new(),
            theme,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        match state.focused() {
            Some(WeatherComponentId::Prompt) => {
                event_ctx.set_component_area(WeatherComponentId::Prompt, area);
                event_ctx
                    .component_areas
                    .remove(&WeatherComponentId::Panel);
            }
            Some(WeatherComponentId::Panel) => {
                event_ctx.set_component_area(WeatherComponentId::Panel, area);
                event_ctx
                    .component_areas
                    .remove(&WeatherComponentId::Prompt);
            }
            None => {}
        }

        let props = WeatherCardProps {
            state,
            is_focused: render_ctx.is_focused(),
            theme: &self.theme,
        };
        self.card.render(frame, area, props);
    }

    fn handle_prompt_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = QueryPromptProps {
            query: &state.query,
            is_focused: true,
            theme: &self.theme,
        };
        let actions: Vec<_> = self
            .card
            .prompt
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_panel_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ReadingPanelProps {
            state,
            is_focused: true,
            theme: &self.theme,
        };
        let actions: Vec<_> = self
            .card
            .panel
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    theme: Theme,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new(theme)));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_prompt = Rc::clone(&ui);
    bus.register(WeatherComponentId::Prompt, move |event, state| {
        ui_prompt
            .borrow_mut()
            .handle_prompt_event(&event.kind, state)
    });

    let ui_panel = Rc::clone(&ui);
    bus.register(WeatherComponentId::Panel, move |event, state| {
        ui_panel
            .borrow_mut()
            .handle_panel_event(&event.kind, state)
    });

    // Viewport follows the terminal in every phase
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(client: &WeatherClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchWeather { query, generation } => {
            let client = client.clone();
            ctx.tasks().spawn(TaskKey::new("weather"), async move {
                match client.fetch(&query).await {
                    Ok(reading) => Action::WeatherDidLoad {
                        generation,
                        reading,
                    },
                    Err(error) => Action::WeatherDidError { generation, error },
                }
            });
        }
    }
}
