//! Application state for both screens and the session history

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::detail::DetailView;
use crate::roster::{self, FilterMode};
use crate::route::{History, NavigationControls, Route};

/// One `{ name, url }` pair from the roster endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub url: String,
}

impl RosterEntry {
    /// Identifier encoded in the reference url, e.g. `.../pokemon/25/` -> `25`.
    ///
    /// Relies on the upstream url shape: the id is path segment 6
    /// when the url is split on `/`.
    pub fn identifier(&self) -> Option<&str> {
        self.url
            .split('/')
            .nth(6)
            .filter(|segment| !segment.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<PokemonStat>,
    /// Tenths of a kilogram.
    pub weight: u16,
    /// Tenths of a metre.
    pub height: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub base_stat: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub language: String,
    pub flavor_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Roster,
    Detail,
}

/// List page controller state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RosterPage {
    /// Loaded once per session; filtering never mutates it.
    pub roster: DataResource<Vec<RosterEntry>>,
    pub visible: Vec<RosterEntry>,
    pub query: String,
    pub mode: FilterMode,
    pub searching: bool,
    pub selected: usize,
}

impl Default for RosterPage {
    fn default() -> Self {
        Self {
            roster: DataResource::Empty,
            visible: Vec::new(),
            query: String::new(),
            mode: FilterMode::default(),
            searching: false,
            selected: 0,
        }
    }
}

impl RosterPage {
    pub fn entries(&self) -> &[RosterEntry] {
        self.roster.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Recompute the visible rows from the stored roster.
    pub fn refilter(&mut self) {
        self.visible = roster::filter_roster(self.entries(), &self.query, self.mode);
        if self.selected >= self.visible.len() {
            self.selected = 0;
        }
    }

    pub fn not_found(&self) -> bool {
        self.visible.is_empty() && !self.roster.is_loading()
    }

    pub fn selected_entry(&self) -> Option<&RosterEntry> {
        self.visible.get(self.selected)
    }

    pub fn set_selected(&mut self, index: usize) -> bool {
        if self.visible.is_empty() {
            self.selected = 0;
            return false;
        }
        let bounded = index.min(self.visible.len() - 1);
        if bounded != self.selected {
            self.selected = bounded;
            return true;
        }
        false
    }
}

/// Detail page controller state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetailPage {
    /// Identifier of the most recent navigation; older responses are dropped.
    pub current_id: Option<u16>,
    pub view: Option<DetailView>,
    pub controls: NavigationControls,
    /// Monotonic counter so superseded requests keep their own task slot.
    pub requests: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub screen: Screen,
    /// Address the session was opened with (`--open`).
    pub start_address: String,
    pub roster_page: RosterPage,
    pub detail_page: DetailPage,
    pub history: History,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::Roster.to_string())
    }
}

impl AppState {
    pub fn new(start_address: impl Into<String>) -> Self {
        Self {
            screen: Screen::Roster,
            start_address: start_address.into(),
            roster_page: RosterPage::default(),
            detail_page: DetailPage::default(),
            history: History::default(),
            terminal_size: (80, 24),
        }
    }

    /// Address shown in the header, mirroring the browser location bar.
    pub fn address(&self) -> String {
        self.history
            .current()
            .map(|route| route.to_string())
            .unwrap_or_else(|| self.start_address.clone())
    }

    pub fn is_searching(&self) -> bool {
        self.screen == Screen::Roster && self.roster_page.searching
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Session")
                .entry("screen", ron_string(&self.screen))
                .entry("address", ron_string(&self.address()))
                .entry("history", ron_string(&self.history.len())),
            DebugSection::new("Roster")
                .entry("total", ron_string(&self.roster_page.entries().len()))
                .entry("visible", ron_string(&self.roster_page.visible.len()))
                .entry("selected", ron_string(&self.roster_page.selected))
                .entry("query", ron_string(&self.roster_page.query))
                .entry("mode", ron_string(&self.roster_page.mode))
                .entry("loading", ron_string(&self.roster_page.roster.is_loading())),
            DebugSection::new("Detail")
                .entry("current_id", ron_string(&self.detail_page.current_id))
                .entry(
                    "shown_id",
                    ron_string(&self.detail_page.view.as_ref().map(|view| view.id)),
                )
                .entry("prev", ron_string(&self.detail_page.controls.prev))
                .entry("next", ron_string(&self.detail_page.controls.next))
                .entry("requests", ron_string(&self.detail_page.requests)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, id: u16) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
        }
    }

    #[test]
    fn identifier_reads_sixth_segment() {
        assert_eq!(entry("pikachu", 25).identifier(), Some("25"));
        let odd = RosterEntry {
            name: "odd".into(),
            url: "pokemon/25".into(),
        };
        assert_eq!(odd.identifier(), None);
    }

    #[test]
    fn refilter_clamps_selection() {
        let mut page = RosterPage {
            roster: DataResource::Loaded(vec![entry("bulbasaur", 1), entry("ivysaur", 2)]),
            selected: 1,
            ..Default::default()
        };
        page.query = "bulb".into();
        page.mode = FilterMode::ByName;
        page.refilter();
        assert_eq!(page.visible.len(), 1);
        assert_eq!(page.selected, 0);
    }

    #[test]
    fn not_found_waits_for_loading() {
        let mut page = RosterPage {
            roster: DataResource::Loading,
            ..Default::default()
        };
        assert!(!page.not_found());
        page.roster = DataResource::Failed("offline".into());
        assert!(page.not_found());
    }
}
