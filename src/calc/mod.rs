//! The calculator engine.
//!
//! This module implements the input-driven core:
//! - The 14-button input alphabet and expression tokens
//! - A grammar that reports which inputs are legal and why others are not
//! - Live and final evaluation with precedence and parentheses
//! - Linear undo/redo over full state snapshots

pub mod input;
pub mod grammar;
pub mod eval;
pub mod state;
pub mod history;
pub mod engine;

pub use input::{InputAction, Op, Token};
pub use grammar::{EnabledVector, Position};
pub use eval::{evaluate, EvalError};
pub use state::EngineState;
pub use history::{HistoryError, HistoryManager};
pub use engine::{Calculator, CalcError};
