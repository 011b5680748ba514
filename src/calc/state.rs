//! The mutable calculator state and its transitions.

use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::calc::eval::{self, EvalError};
use crate::calc::input::{render, InputAction, Token};

/// Expression typed so far plus the value on the display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Tokens in typing order. Always a prefix the grammar can extend.
    pub tokens: Vec<Token>,
    /// Value currently shown.
    pub display: i64,
    /// Number of unmatched `(` tokens.
    pub depth: usize,
}

impl EngineState {
    /// The empty state: no tokens, display 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last token, if any.
    pub fn last(&self) -> Option<Token> {
        self.tokens.last().copied()
    }

    /// True right after a successful `=`.
    pub fn is_evaluated(&self) -> bool {
        self.last() == Some(Token::Equals)
    }

    /// True if nothing has been typed and the display shows zero.
    pub fn is_clear(&self) -> bool {
        self.tokens.is_empty() && self.display == 0
    }

    /// Expression text as typed, e.g. `"(1+2)*2"`.
    pub fn expression(&self) -> String {
        render(&self.tokens)
    }

    /// Compute the state that follows `action`.
    ///
    /// The action must already have passed the grammar check. Undo and redo
    /// are handled by the history and leave the state as is here. Only `=`
    /// can fail, in which case `self` is untouched.
    pub fn apply(&self, action: InputAction) -> Result<EngineState, EvalError> {
        let mut next = self.clone();
        match action {
            InputAction::Token(Token::Equals) => {
                let value = eval::evaluate(&self.tokens)?;
                next.tokens.push(Token::Equals);
                next.display = value;
            }
            InputAction::Token(token @ (Token::Digit(_) | Token::Open)) if self.is_evaluated() => {
                // A new operand after `=` starts a fresh expression.
                next.tokens.clear();
                next.depth = 0;
                next.push(token);
            }
            InputAction::Token(token) => next.push(token),
            InputAction::ClearEntry => next.pop(),
            InputAction::ClearAll => next = EngineState::new(),
            InputAction::Undo | InputAction::Redo => {}
        }
        Ok(next)
    }

    fn push(&mut self, token: Token) {
        match token {
            Token::Open => self.depth += 1,
            Token::Close => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        self.tokens.push(token);
        self.refresh_display();
    }

    /// Remove exactly one token; one digit of a multi-digit operand.
    fn pop(&mut self) {
        match self.tokens.pop() {
            Some(Token::Open) => self.depth = self.depth.saturating_sub(1),
            Some(Token::Close) => self.depth += 1,
            _ => {}
        }
        self.refresh_display();
    }

    /// Recompute the display from the tokens alone.
    ///
    /// Digits typed inside an open group show that group's value so far.
    /// Prefixes that fail to evaluate (a pending `1/0`, an overflowing sum)
    /// are skipped in favour of the longest shorter one that succeeds, so a
    /// value left over from tokens removed by ClearEntry is never shown.
    fn refresh_display(&mut self) {
        self.display = eval::live_value(&self.tokens);
        debug!(display = self.display, depth = self.depth, "display refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::input::Op;
    use crate::ternary::Digit;

    fn run(actions: &[InputAction]) -> EngineState {
        actions
            .iter()
            .fold(EngineState::new(), |state, &a| state.apply(a).unwrap())
    }

    const ONE: InputAction = InputAction::digit(Digit::One);
    const TWO: InputAction = InputAction::digit(Digit::Two);
    const ZERO: InputAction = InputAction::digit(Digit::Zero);
    const PLUS: InputAction = InputAction::op(Op::Add);
    const OPEN: InputAction = InputAction::Token(Token::Open);
    const CLOSE: InputAction = InputAction::Token(Token::Close);
    const EQUALS: InputAction = InputAction::Token(Token::Equals);

    #[test]
    fn test_live_display_follows_digits() {
        let state = run(&[ONE, ZERO]);
        assert_eq!(state.display, 3);
        assert_eq!(state.expression(), "10");
    }

    #[test]
    fn test_display_after_operator_keeps_prefix_value() {
        let state = run(&[ONE, PLUS]);
        assert_eq!(state.display, 1);
        let state = run(&[ONE, PLUS, TWO]);
        assert_eq!(state.display, 3);
    }

    #[test]
    fn test_live_display_inside_group() {
        let state = run(&[OPEN, ONE, TWO]);
        assert_eq!(state.display, 5);
        let state = run(&[ONE, PLUS, OPEN]);
        assert_eq!(state.display, 1);
    }

    #[test]
    fn test_clear_entry_recomputes_failing_prefix() {
        let div = InputAction::op(Op::Div);
        // 21/0 cannot be evaluated, so the display shows 21
        assert_eq!(run(&[TWO, ONE, div, ZERO]).display, 7);

        let cleared = run(&[TWO, ONE, div, ZERO, InputAction::ClearEntry, InputAction::ClearEntry]);
        assert_eq!(cleared, run(&[TWO, ONE]));
        let cleared = cleared.apply(InputAction::ClearEntry).unwrap();
        assert_eq!(cleared, run(&[TWO]));
        assert_eq!(cleared.display, 2);
    }

    #[test]
    fn test_depth_tracking() {
        let state = run(&[OPEN, OPEN, ONE, CLOSE]);
        assert_eq!(state.depth, 1);
        let state = state.apply(InputAction::ClearEntry).unwrap();
        assert_eq!(state.depth, 2);
        let state = run(&[OPEN]).apply(InputAction::ClearEntry).unwrap();
        assert_eq!(state.depth, 0);
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_equals_failure_leaves_state() {
        let before = run(&[ONE, InputAction::op(Op::Div), ZERO]);
        assert_eq!(before.apply(EQUALS), Err(EvalError::DivisionByZero));
        assert_eq!(before.expression(), "1/0");
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        let state = run(&[ONE, PLUS, ONE, EQUALS]);
        assert_eq!(state.display, 2);
        let state = state.apply(TWO).unwrap();
        assert_eq!(state.expression(), "2");
        assert_eq!(state.display, 2);
    }

    #[test]
    fn test_operator_after_equals_continues() {
        let state = run(&[ONE, PLUS, ONE, EQUALS, PLUS, ONE, EQUALS]);
        assert_eq!(state.display, 3);
        assert_eq!(state.expression(), "1+1=+1=");
    }

    #[test]
    fn test_clear_entry_removes_single_digit() {
        let state = run(&[TWO, ONE, ONE]).apply(InputAction::ClearEntry).unwrap();
        assert_eq!(state.expression(), "21");
        assert_eq!(state.display, 7);
    }

    #[test]
    fn test_clear_all_resets() {
        let state = run(&[OPEN, TWO, PLUS]).apply(InputAction::ClearAll).unwrap();
        assert_eq!(state, EngineState::new());
        assert!(state.is_clear());
    }
}
