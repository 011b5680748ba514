//! The calculator: engine state plus undo/redo history.
//!
//! Every input goes through [`Calculator::feed`]: validate against the
//! grammar, compute the next state, record the previous one, and report
//! the new display value.

use thiserror::Error;
use tracing::debug;
use crate::calc::eval::EvalError;
use crate::calc::grammar::{self, EnabledVector};
use crate::calc::history::{HistoryError, HistoryManager};
use crate::calc::input::{InputAction, Token};
use crate::calc::state::EngineState;
use crate::config::EngineConfig;
use crate::ternary::TernaryBuf;

/// One calculator instance.
///
/// Owns its state and history exclusively; dropping the calculator
/// releases both.
#[derive(Debug, Clone)]
pub struct Calculator {
    state: EngineState,
    history: HistoryManager<EngineState>,
}

impl Calculator {
    /// Create a calculator with empty state and unbounded history.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create a calculator using the given options.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            state: EngineState::new(),
            history: HistoryManager::with_limit(config.history_limit),
        }
    }

    /// Apply one input.
    ///
    /// Returns the display value on success. On error nothing changes:
    /// neither the state nor the history.
    pub fn feed(&mut self, action: InputAction) -> Result<i64, CalcError> {
        match action {
            InputAction::Undo => self.history.undo(&mut self.state)?,
            InputAction::Redo => self.history.redo(&mut self.state)?,
            _ => {
                grammar::check(&self.state, action, self.can_undo(), self.can_redo())
                    .map_err(|reason| CalcError::IllegalInput { action, reason })?;
                let next = self.state.apply(action)?;
                let previous = std::mem::replace(&mut self.state, next);
                self.history.record(previous);
            }
        }

        debug!(
            %action,
            expression = %self.state.expression(),
            display = self.state.display,
            "applied input"
        );
        Ok(self.state.display)
    }

    /// Apply one input, ignoring rejections.
    ///
    /// This is the call a front-end makes on every button press: the
    /// returned display value is unchanged when the input was rejected.
    pub fn press(&mut self, action: InputAction) -> i64 {
        if let Err(e) = self.feed(action) {
            debug!(%action, error = %e, "input rejected");
        }
        self.state.display
    }

    /// Feed a string of key characters, stopping at the first error.
    ///
    /// Unknown characters are reported as [`CalcError::UnknownKey`].
    pub fn feed_keys(&mut self, keys: &str) -> Result<i64, CalcError> {
        for key in keys.chars().filter(|c| !c.is_whitespace()) {
            let action = InputAction::from_key(key).ok_or(CalcError::UnknownKey(key))?;
            self.feed(action)?;
        }
        Ok(self.state.display)
    }

    /// Legality of all 14 actions in the current state.
    pub fn enabled(&self) -> EnabledVector {
        EnabledVector::compute(&self.state, self.can_undo(), self.can_redo())
    }

    /// Value currently shown.
    pub fn display(&self) -> i64 {
        self.state.display
    }

    /// Current value as ternary text.
    pub fn display_ternary(&self) -> TernaryBuf {
        TernaryBuf::new(self.state.display)
    }

    /// Expression typed so far.
    pub fn expression(&self) -> String {
        self.state.expression()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.state.tokens
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors reported by [`Calculator::feed`]. All of them leave the
/// calculator unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("{action} not allowed: {reason}")]
    IllegalInput { action: InputAction, reason: &'static str },

    #[error("unknown key: '{0}'")]
    UnknownKey(char),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    History(#[from] HistoryError),
}
