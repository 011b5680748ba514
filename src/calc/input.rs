//! Input alphabet: expression tokens and the 14 keypad actions.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ternary::Digit;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Binding strength: `*` and `/` bind tighter than `+` and `-`.
    #[inline]
    pub const fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    /// Operator symbol.
    pub const fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }
}

/// One element of the expression typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Digit(Digit),
    Op(Op),
    Open,
    Close,
    /// A completed evaluation. Later operators treat the result as their
    /// left operand.
    Equals,
}

impl Token {
    /// Character this token is typed and shown with.
    pub const fn symbol(self) -> char {
        match self {
            Token::Digit(d) => d.to_char(),
            Token::Op(op) => op.symbol(),
            Token::Open => '(',
            Token::Close => ')',
            Token::Equals => '=',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a token sequence as the text a user typed.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.symbol()).collect()
}

/// A keypad button: every expression token plus the control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Token(Token),
    /// Remove the most recent token.
    ClearEntry,
    /// Reset the expression and display.
    ClearAll,
    Undo,
    Redo,
}

impl InputAction {
    /// Number of distinct actions.
    pub const COUNT: usize = 14;

    /// Every action in the fixed order used by [`EnabledVector`](super::EnabledVector).
    ///
    /// Front-ends map positions to controls, so this order must not change.
    pub const ALL: [InputAction; Self::COUNT] = [
        InputAction::Token(Token::Digit(Digit::Zero)),
        InputAction::Token(Token::Digit(Digit::One)),
        InputAction::Token(Token::Digit(Digit::Two)),
        InputAction::Token(Token::Op(Op::Add)),
        InputAction::Token(Token::Op(Op::Sub)),
        InputAction::Token(Token::Op(Op::Mul)),
        InputAction::Token(Token::Op(Op::Div)),
        InputAction::Token(Token::Open),
        InputAction::Token(Token::Close),
        InputAction::Token(Token::Equals),
        InputAction::ClearEntry,
        InputAction::ClearAll,
        InputAction::Undo,
        InputAction::Redo,
    ];

    /// Shorthand for a digit button.
    pub const fn digit(d: Digit) -> Self {
        InputAction::Token(Token::Digit(d))
    }

    /// Shorthand for an operator button.
    pub const fn op(op: Op) -> Self {
        InputAction::Token(Token::Op(op))
    }

    /// Position of this action in [`InputAction::ALL`].
    pub const fn index(self) -> usize {
        match self {
            InputAction::Token(Token::Digit(d)) => d.value() as usize,
            InputAction::Token(Token::Op(Op::Add)) => 3,
            InputAction::Token(Token::Op(Op::Sub)) => 4,
            InputAction::Token(Token::Op(Op::Mul)) => 5,
            InputAction::Token(Token::Op(Op::Div)) => 6,
            InputAction::Token(Token::Open) => 7,
            InputAction::Token(Token::Close) => 8,
            InputAction::Token(Token::Equals) => 9,
            InputAction::ClearEntry => 10,
            InputAction::ClearAll => 11,
            InputAction::Undo => 12,
            InputAction::Redo => 13,
        }
    }

    /// Key character bound to this action.
    pub const fn key(self) -> char {
        match self {
            InputAction::Token(token) => token.symbol(),
            InputAction::ClearEntry => 'C',
            InputAction::ClearAll => 'A',
            InputAction::Undo => 'U',
            InputAction::Redo => 'R',
        }
    }

    /// Action bound to a key character, if any.
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    /// Short button label.
    pub const fn label(self) -> &'static str {
        match self {
            InputAction::Token(Token::Digit(Digit::Zero)) => "0",
            InputAction::Token(Token::Digit(Digit::One)) => "1",
            InputAction::Token(Token::Digit(Digit::Two)) => "2",
            InputAction::Token(Token::Op(Op::Add)) => "+",
            InputAction::Token(Token::Op(Op::Sub)) => "-",
            InputAction::Token(Token::Op(Op::Mul)) => "*",
            InputAction::Token(Token::Op(Op::Div)) => "/",
            InputAction::Token(Token::Open) => "(",
            InputAction::Token(Token::Close) => ")",
            InputAction::Token(Token::Equals) => "=",
            InputAction::ClearEntry => "CE",
            InputAction::ClearAll => "AC",
            InputAction::Undo => "Undo",
            InputAction::Redo => "Redo",
        }
    }

    /// True for actions that change the expression and are recorded in history.
    pub const fn is_mutating(self) -> bool {
        !matches!(self, InputAction::Undo | InputAction::Redo)
    }
}

impl From<Token> for InputAction {
    fn from(token: Token) -> Self {
        InputAction::Token(token)
    }
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
