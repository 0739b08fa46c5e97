//! Weather prompt TUI
//!
//! Library half of the binary, exposed so the reducer, the fetch client and
//! the components can be tested without a terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod theme;
