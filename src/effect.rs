//! Side effects declared by the reducer

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadRoster,
    /// Fetch record and species before leaving the roster
    Prefetch { id: u16 },
    /// `request` keeps superseded loads running in their own task slot
    LoadDetail { id: u16, request: u64 },
    SetTitle { title: String },
}
