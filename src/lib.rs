//! Kanto Pokedex TUI
//!
//! The library exposes the app's modules so the binary and the
//! integration tests share one reducer and one set of components.

pub mod action;
pub mod api;
pub mod components;
pub mod detail;
pub mod effect;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod roster;
pub mod route;
pub mod state;
