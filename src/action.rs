//! User intents and async completions

use serde::{Deserialize, Serialize};

use crate::roster::FilterMode;
use crate::state::{PokemonRecord, RosterEntry, SpeciesRecord};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    RosterDidLoad(Vec<RosterEntry>),
    RosterDidError(String),
    RosterSelect(usize),
    RosterMove(i16),
    /// Activate the selected row (prefetch gate, then navigate)
    RosterOpen,

    GateDidPass(u16),
    GateDidFail { id: u16, error: String },

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchClear,

    FilterModeCycle,
    FilterModeSet(FilterMode),

    DetailPrev,
    DetailNext,
    DetailDidLoad {
        id: u16,
        record: PokemonRecord,
        species: SpeciesRecord,
    },
    DetailDidError { id: u16, error: String },

    HistoryBack,
    HistoryForward,
    ShowRoster,

    UiTerminalResize(u16, u16),
    Quit,
}
