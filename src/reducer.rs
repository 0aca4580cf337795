//! Reducer: page controllers for the roster and detail screens

use tracing::{debug, error, info, warn};
use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::detail;
use crate::effect::Effect;
use crate::route::{NavigationControls, Route};
use crate::state::{AppState, Screen};

pub const ROSTER_TITLE: &str = "Pokedex";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => match Route::resolve(&state.start_address) {
            Ok(route) => enter_route(state, route),
            Err(err) => {
                info!(address = %state.start_address, error = %err, "redirecting to roster");
                enter_route(state, Route::Roster)
            }
        },

        Action::RosterDidLoad(entries) => {
            info!(count = entries.len(), "roster loaded");
            let page = &mut state.roster_page;
            page.roster = DataResource::Loaded(entries);
            page.selected = 0;
            page.refilter();
            DispatchResult::changed()
        }

        Action::RosterDidError(message) => {
            error!(error = %message, "roster load failed");
            let page = &mut state.roster_page;
            page.roster = DataResource::Failed(message);
            page.refilter();
            DispatchResult::changed()
        }

        Action::RosterSelect(index) => {
            if !state.roster_page.set_selected(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::RosterMove(delta) => {
            let index = (state.roster_page.selected as i64 + i64::from(delta)).max(0);
            if !state.roster_page.set_selected(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::RosterOpen => {
            if state.screen != Screen::Roster {
                return DispatchResult::unchanged();
            }
            let Some(id) = state
                .roster_page
                .selected_entry()
                .and_then(|entry| entry.identifier())
                .and_then(|id| id.parse::<u16>().ok())
            else {
                return DispatchResult::unchanged();
            };
            debug!(id, "prefetching before navigation");
            DispatchResult::changed_with(Effect::Prefetch { id })
        }

        Action::GateDidPass(id) => {
            // a later gate may resolve after the first one already navigated
            if state.screen != Screen::Roster {
                return DispatchResult::unchanged();
            }
            state.history.visit(Route::Detail(id));
            enter_route(state, Route::Detail(id))
        }

        Action::GateDidFail { id, error } => {
            warn!(id, %error, "failed to fetch pokemon data before redirect");
            DispatchResult::unchanged()
        }

        Action::SearchStart => {
            if state.screen != Screen::Roster || state.roster_page.searching {
                return DispatchResult::unchanged();
            }
            state.roster_page.searching = true;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.roster_page.query.push(ch);
            state.roster_page.refilter();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.roster_page.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.roster_page.refilter();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.roster_page.searching = false;
            DispatchResult::changed()
        }

        Action::SearchClear => {
            let page = &mut state.roster_page;
            page.searching = false;
            page.query.clear();
            page.refilter();
            DispatchResult::changed()
        }

        Action::FilterModeCycle => {
            let page = &mut state.roster_page;
            page.mode = page.mode.cycle();
            page.refilter();
            DispatchResult::changed()
        }

        Action::FilterModeSet(mode) => {
            let page = &mut state.roster_page;
            if page.mode == mode {
                return DispatchResult::unchanged();
            }
            page.mode = mode;
            page.refilter();
            DispatchResult::changed()
        }

        Action::DetailPrev => {
            let target = state.detail_page.controls.prev;
            match target {
                Some(id) if state.screen == Screen::Detail => open_detail(state, id),
                _ => DispatchResult::unchanged(),
            }
        }

        Action::DetailNext => {
            let target = state.detail_page.controls.next;
            match target {
                Some(id) if state.screen == Screen::Detail => open_detail(state, id),
                _ => DispatchResult::unchanged(),
            }
        }

        Action::DetailDidLoad {
            id,
            record,
            species,
        } => {
            if state.screen != Screen::Detail || state.detail_page.current_id != Some(id) {
                debug!(id, current = ?state.detail_page.current_id, "discarding stale detail response");
                return DispatchResult::unchanged();
            }
            let view = detail::project(&record, &species);
            let title = view.title.clone();
            state.detail_page.view = Some(view);
            state.detail_page.controls = NavigationControls::for_id(id);
            state.history.visit(Route::Detail(id));
            DispatchResult::changed_with(Effect::SetTitle { title })
        }

        Action::DetailDidError { id, error } => {
            warn!(id, %error, "failed to load pokemon data");
            DispatchResult::unchanged()
        }

        Action::HistoryBack => match state.history.back() {
            Some(route) => enter_route(state, route),
            None => DispatchResult::unchanged(),
        },

        Action::HistoryForward => match state.history.forward() {
            Some(route) => enter_route(state, route),
            None => DispatchResult::unchanged(),
        },

        Action::ShowRoster => {
            if state.screen == Screen::Roster {
                return DispatchResult::unchanged();
            }
            enter_route(state, Route::Roster)
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn enter_route(state: &mut AppState, route: Route) -> DispatchResult<Effect> {
    match route {
        Route::Roster => {
            state.screen = Screen::Roster;
            state.history.visit(Route::Roster);
            // leaving the detail screen drops its record and in-flight interest
            let requests = state.detail_page.requests;
            state.detail_page = Default::default();
            state.detail_page.requests = requests;

            let mut effects = vec![Effect::SetTitle {
                title: ROSTER_TITLE.to_string(),
            }];
            if state.roster_page.roster.is_empty() {
                state.roster_page.roster = DataResource::Loading;
                effects.push(Effect::LoadRoster);
            }
            DispatchResult::changed_with_many(effects)
        }
        Route::Detail(id) => {
            state.screen = Screen::Detail;
            state.roster_page.searching = false;
            open_detail(state, id)
        }
    }
}

/// Track `id` as current and start its load; older loads become stale.
fn open_detail(state: &mut AppState, id: u16) -> DispatchResult<Effect> {
    info!(id, "loading pokemon");
    state.detail_page.current_id = Some(id);
    state.detail_page.requests += 1;
    DispatchResult::changed_with(Effect::LoadDetail {
        id,
        request: state.detail_page.requests,
    })
}
