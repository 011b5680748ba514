//! Which inputs may follow the current expression, and why not.
//!
//! Legality depends only on the tokens typed so far, the open-parenthesis
//! depth, the displayed value and whether the history stacks are empty.

use serde::Serialize;
use crate::calc::eval::{self, EvalError};
use crate::calc::input::{InputAction, Token};
use crate::calc::state::EngineState;
use crate::ternary::Digit;

/// Explanations shown for disabled controls.
pub mod reason {
    pub const NUMBER_TOO_LARGE: &str = "number too large";
    pub const EXPECT_OPERATOR: &str = "expected an operator after ')'";
    pub const EXPECT_NUMBER: &str = "expected a number first";
    pub const TWO_OPERATORS: &str = "cannot combine two operators";
    pub const OPERATOR_AFTER_OPEN: &str = "expected a number after '('";
    pub const OPEN_AFTER_NUMBER: &str = "cannot open a parenthesis directly after a number";
    pub const NO_MATCHING_OPEN: &str = "cannot close: no matching open parenthesis";
    pub const EMPTY_GROUP: &str = "cannot close an empty parenthetical";
    pub const CLOSE_AFTER_OPERATOR: &str = "cannot close after an operator";
    pub const NOTHING_TO_EVALUATE: &str = "nothing to evaluate";
    pub const ALREADY_EVALUATED: &str = "already evaluated";
    pub const ENDS_WITH_OPERATOR: &str = "expression ends with an operator";
    pub const UNCLOSED_PARENTHESIS: &str = "unclosed parenthesis";
    pub const NOTHING_TO_CLEAR: &str = "nothing to clear";
    pub const ALREADY_CLEAR: &str = "already cleared";
    pub const NO_PREVIOUS: &str = "no previous calculation";
    pub const NO_NEXT: &str = "no next calculation";
}

/// Where the next token would land, judged by the last token typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Nothing typed yet.
    Start,
    AfterDigit,
    AfterOperator,
    AfterOpen,
    AfterClose,
    AfterEquals,
}

impl Position {
    pub fn of(tokens: &[Token]) -> Self {
        match tokens.last() {
            None => Position::Start,
            Some(Token::Digit(_)) => Position::AfterDigit,
            Some(Token::Op(_)) => Position::AfterOperator,
            Some(Token::Open) => Position::AfterOpen,
            Some(Token::Close) => Position::AfterClose,
            Some(Token::Equals) => Position::AfterEquals,
        }
    }

    /// True where an operand has just been completed.
    pub fn ends_operand(self) -> bool {
        matches!(self, Position::AfterDigit | Position::AfterClose | Position::AfterEquals)
    }
}

/// Check whether `token` may be appended to `state`.
pub fn check_token(state: &EngineState, token: Token) -> Result<(), &'static str> {
    let position = Position::of(&state.tokens);
    match token {
        Token::Digit(d) => check_digit(state, position, d),
        Token::Op(_) => match position {
            p if p.ends_operand() => Ok(()),
            Position::Start => Err(reason::EXPECT_NUMBER),
            Position::AfterOpen => Err(reason::OPERATOR_AFTER_OPEN),
            _ => Err(reason::TWO_OPERATORS),
        },
        Token::Open => match position {
            Position::Start
            | Position::AfterOperator
            | Position::AfterOpen
            | Position::AfterEquals => Ok(()),
            Position::AfterDigit => Err(reason::OPEN_AFTER_NUMBER),
            Position::AfterClose => Err(reason::EXPECT_OPERATOR),
        },
        Token::Close => {
            if state.depth == 0 {
                return Err(reason::NO_MATCHING_OPEN);
            }
            match position {
                Position::AfterDigit | Position::AfterClose => Ok(()),
                Position::AfterOpen => Err(reason::EMPTY_GROUP),
                _ => Err(reason::CLOSE_AFTER_OPERATOR),
            }
        }
        Token::Equals => match position {
            Position::Start => Err(reason::NOTHING_TO_EVALUATE),
            Position::AfterEquals => Err(reason::ALREADY_EVALUATED),
            Position::AfterOperator => Err(reason::ENDS_WITH_OPERATOR),
            Position::AfterOpen => Err(reason::UNCLOSED_PARENTHESIS),
            Position::AfterDigit | Position::AfterClose if state.depth > 0 => {
                Err(reason::UNCLOSED_PARENTHESIS)
            }
            Position::AfterDigit | Position::AfterClose => Ok(()),
        },
    }
}

fn check_digit(state: &EngineState, position: Position, digit: Digit) -> Result<(), &'static str> {
    match position {
        Position::AfterClose => Err(reason::EXPECT_OPERATOR),
        Position::AfterDigit => match eval::trailing_operand(&state.tokens) {
            Some(Ok(value)) if digit.append_to(value).is_some() => Ok(()),
            Some(Err(EvalError::Overflow)) | Some(Ok(_)) => Err(reason::NUMBER_TOO_LARGE),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Check whether `action` is legal in `state` given the history occupancy.
pub fn check(
    state: &EngineState,
    action: InputAction,
    can_undo: bool,
    can_redo: bool,
) -> Result<(), &'static str> {
    match action {
        InputAction::Token(token) => check_token(state, token),
        InputAction::ClearEntry if state.tokens.is_empty() => Err(reason::NOTHING_TO_CLEAR),
        InputAction::ClearAll if state.is_clear() => Err(reason::ALREADY_CLEAR),
        InputAction::Undo if !can_undo => Err(reason::NO_PREVIOUS),
        InputAction::Redo if !can_redo => Err(reason::NO_NEXT),
        _ => Ok(()),
    }
}

/// For each of the 14 actions, `None` if enabled or the reason it is not.
///
/// Entries follow the order of [`InputAction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnabledVector([Option<&'static str>; InputAction::COUNT]);

impl EnabledVector {
    /// Evaluate every action against `state`.
    pub fn compute(state: &EngineState, can_undo: bool, can_redo: bool) -> Self {
        Self(InputAction::ALL.map(|action| check(state, action, can_undo, can_redo).err()))
    }

    /// Reason `action` is disabled, or `None` if it is enabled.
    pub fn reason(&self, action: InputAction) -> Option<&'static str> {
        self.0[action.index()]
    }

    pub fn is_enabled(&self, action: InputAction) -> bool {
        self.reason(action).is_none()
    }

    /// Raw entries in contract order.
    pub fn as_array(&self) -> &[Option<&'static str>; InputAction::COUNT] {
        &self.0
    }

    /// Pairs of action and reason, in contract order.
    pub fn iter(&self) -> impl Iterator<Item = (InputAction, Option<&'static str>)> + '_ {
        InputAction::ALL.iter().copied().zip(self.0.iter().copied())
    }
}
