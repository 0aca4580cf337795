//! Pokedex TUI - browse the first 151 Pokemon from PokeAPI

use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info, warn};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::components::{
    Component, DetailPanel, DetailPanelProps, RosterList, RosterListProps, SearchBar,
    SearchBarProps, ACCENT_GOLD, ACCENT_RED, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, Screen};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Kanto Pokedex from PokeAPI")]
struct Args {
    /// Address to open, e.g. `roster` or `detail?id=25`
    #[arg(long, short, default_value = "roster")]
    open: String,

    /// Alternative PokeAPI base url (testing against a mirror)
    #[arg(long)]
    api_base: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    Roster,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    Roster,
    Search,
    Detail,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.is_searching() {
            return Some(DexComponentId::Search);
        }
        match self.screen {
            Screen::Roster => Some(DexComponentId::Roster),
            Screen::Detail => Some(DexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.is_searching() {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::Roster => DexContext::Roster,
            DexComponentId::Search => DexContext::Search,
            DexComponentId::Detail => DexContext::Detail,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::Roster
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        open,
        api_base,
        debug: debug_args,
    } = Args::parse();

    logging::init_tracing();
    if let Some(base) = api_base {
        api::set_api_base(base);
    }
    info!(address = %open, api = api::shared().base(), "starting pokedex");

    let debug = DebugSession::new(debug_args);

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(AppState::new(open)) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

struct DexUi {
    roster: RosterList,
    search: SearchBar,
    detail: DetailPanel,
    status_bar: StatusBar,
}

impl DexUi {
    fn new() -> Self {
        Self {
            roster: RosterList::new(),
            search: SearchBar,
            detail: DetailPanel,
            status_bar: StatusBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

        render_address(frame, layout[0], state);
        match state.screen {
            Screen::Roster => {
                let body = Layout::vertical([Constraint::Length(3), Constraint::Min(3)])
                    .split(layout[1]);
                event_ctx.set_component_area(DexComponentId::Search, body[0]);
                event_ctx.set_component_area(DexComponentId::Roster, body[1]);
                event_ctx.component_areas.remove(&DexComponentId::Detail);

                let props = SearchBarProps {
                    query: &state.roster_page.query,
                    mode: state.roster_page.mode,
                    is_active: state.is_searching(),
                };
                self.search.render(frame, body[0], props);

                let props = RosterListProps {
                    page: &state.roster_page,
                    is_focused: render_ctx.is_focused() && !state.is_searching(),
                };
                self.roster.render(frame, body[1], props);
            }
            Screen::Detail => {
                event_ctx.set_component_area(DexComponentId::Detail, layout[1]);
                event_ctx.component_areas.remove(&DexComponentId::Roster);
                event_ctx.component_areas.remove(&DexComponentId::Search);

                let props = DetailPanelProps {
                    page: &state.detail_page,
                    is_focused: render_ctx.is_focused(),
                };
                self.detail.render(frame, layout[1], props);
            }
        }
        self.render_footer(frame, layout[2], state);
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let global = [
            StatusBarHint::new("[ ]", "History"),
            StatusBarHint::new("q", "Quit"),
        ];
        let status = if state.roster_page.roster.is_loading() {
            "Loading roster...".to_string()
        } else if state.screen == Screen::Detail
            && state.detail_page.view.as_ref().map(|view| view.id) != state.detail_page.current_id
        {
            "Loading pokemon...".to_string()
        } else {
            String::new()
        };
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(ACCENT_GOLD),
        ))];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: None,
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::hints(&global).with_separator("  "),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }

    fn handle_roster_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = RosterListProps {
            page: &state.roster_page,
            is_focused: true,
        };
        let actions: Vec<_> = self.roster.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }

    fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            query: &state.roster_page.query,
            mode: state.roster_page.mode,
            is_active: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        // modal: swallow everything while typing
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = DetailPanelProps {
            page: &state.detail_page,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
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

fn render_address(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            " POKEDEX ",
            Style::default()
                .bg(ACCENT_RED)
                .fg(TEXT_MAIN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("pokedex://{}", state.address()),
            Style::default().fg(TEXT_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.is_searching() {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Tab", "Mode"),
        ];
    }
    match state.screen {
        Screen::Roster => vec![
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("f", "Mode"),
            StatusBarHint::new("c", "Clear"),
        ],
        Screen::Detail => vec![
            StatusBarHint::new("<- ->", "Prev/Next"),
            StatusBarHint::new("Esc", "Roster"),
        ],
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_roster = Rc::clone(&ui);
    bus.register(DexComponentId::Roster, move |event, state| {
        ui_roster
            .borrow_mut()
            .handle_roster_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if !state.is_searching() => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            KeyCode::Char('[') => HandlerResponse::action(Action::HistoryBack),
            KeyCode::Char(']') => HandlerResponse::action(Action::HistoryForward),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadRoster => {
            ctx.tasks().spawn(TaskKey::new("roster"), async {
                match api::shared().fetch_roster().await {
                    Ok(entries) => Action::RosterDidLoad(entries),
                    Err(err) => Action::RosterDidError(err.to_string()),
                }
            });
        }
        Effect::Prefetch { id } => {
            let key = format!("gate_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::shared().prefetch(id).await {
                    Ok(()) => Action::GateDidPass(id),
                    Err(err) => Action::GateDidFail {
                        id,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::LoadDetail { id, request } => {
            // unique per request; superseded fetches run to completion
            let key = format!("detail_{id}_{request}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::shared().fetch_detail(id).await {
                    Ok((record, species)) => Action::DetailDidLoad {
                        id,
                        record,
                        species,
                    },
                    Err(err) => Action::DetailDidError {
                        id,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::SetTitle { title } => {
            let mut stdout = io::stdout();
            if !stdout.is_terminal() {
                debug!(%title, "stdout is not a terminal, skipping title");
                return;
            }
            if let Err(err) = execute!(stdout, SetTitle(&title)) {
                warn!(%title, error = %err, "failed to set terminal title");
            }
        }
    }
}
