//! Terminal keypad front-end.
//!
//! Provides an interactive calculator in the terminal with:
//! - Ternary display with a decimal "cheat" toggle
//! - A 14-button keypad that greys out illegal buttons
//! - The reason the selected button is disabled

mod app;
mod ui;

pub use app::{KeypadApp, run_keypad};
