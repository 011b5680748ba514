//! Expression evaluation over token sequences.
//!
//! Grammar (lowest to highest binding):
//! ```text
//! session  := additive ( '=' additive_tail )*
//! additive := term ( ('+' | '-') term )*
//! term     := primary ( ('*' | '/') primary )*
//! primary  := digit+ | '(' additive ')'
//! ```
//! An `=` reduces everything before it to a single value, which becomes the
//! left operand of whatever operator follows.

use thiserror::Error;
use tracing::trace;
use crate::calc::input::{Op, Token};

/// Evaluate a complete token sequence.
///
/// The sequence must be balanced and end with an operand, `)` or `=`.
/// Arithmetic is checked `i64`; division truncates toward zero.
pub fn evaluate(tokens: &[Token]) -> Result<i64, EvalError> {
    let mut eval = Evaluator { tokens, pos: 0 };
    let value = eval.session()?;
    trace!(value, len = tokens.len(), "evaluated");
    Ok(value)
}

/// Value to show while `tokens` is still being typed.
///
/// The innermost unclosed group is looked at first, and its longest
/// complete prefix that evaluates gives the value. A group with no such
/// prefix (just opened, or every prefix fails) defers to the group around
/// it. The result depends only on `tokens`; 0 when nothing evaluates.
pub fn live_value(tokens: &[Token]) -> i64 {
    let mut end = tokens.len();
    loop {
        let start = open_group_start(&tokens[..end]);
        let group = &tokens[start..end];
        let value = complete_prefix_lens(group)
            .into_iter()
            .rev()
            .find_map(|len| evaluate(&group[..len]).ok());
        if let Some(value) = value {
            return value;
        }
        if start == 0 {
            return 0;
        }
        // skip the group's own '('
        end = start - 1;
    }
}

/// Index just past the last unmatched `(`, or 0 at the top level.
fn open_group_start(tokens: &[Token]) -> usize {
    let mut closes = 0usize;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::Close => closes += 1,
            Token::Open if closes == 0 => return i + 1,
            Token::Open => closes -= 1,
            _ => {}
        }
    }
    0
}

/// Lengths of every prefix of `tokens` that is a complete expression,
/// shortest first.
///
/// A prefix is complete when its parentheses balance and it ends with a
/// digit, `)` or `=`.
fn complete_prefix_lens(tokens: &[Token]) -> Vec<usize> {
    let mut depth = 0usize;
    let mut lens = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Open => depth += 1,
            Token::Close => depth = depth.saturating_sub(1),
            _ => {}
        }
        let ends_operand = matches!(token, Token::Digit(_) | Token::Close | Token::Equals);
        if depth == 0 && ends_operand {
            lens.push(i + 1);
        }
    }
    lens
}

/// Value of the digit run at the end of `tokens`, if it ends with one.
///
/// Returns `Some(Err(..))` when the run does not fit in an `i64`.
pub fn trailing_operand(tokens: &[Token]) -> Option<Result<i64, EvalError>> {
    let run = tokens
        .iter()
        .rev()
        .take_while(|t| matches!(t, Token::Digit(_)))
        .count();
    if run == 0 {
        return None;
    }
    Some(compose(&tokens[tokens.len() - run..]))
}

fn compose(digits: &[Token]) -> Result<i64, EvalError> {
    digits.iter().try_fold(0i64, |acc, token| match token {
        Token::Digit(d) => d.append_to(acc).ok_or(EvalError::Overflow),
        _ => Err(EvalError::Incomplete),
    })
}

/// Apply a binary operator with overflow and zero-division checks.
pub fn apply(op: Op, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    match op {
        Op::Add => lhs.checked_add(rhs).ok_or(EvalError::Overflow),
        Op::Sub => lhs.checked_sub(rhs).ok_or(EvalError::Overflow),
        Op::Mul => lhs.checked_mul(rhs).ok_or(EvalError::Overflow),
        Op::Div => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            // i64::MIN / -1 is the only overflowing quotient
            lhs.checked_div(rhs).ok_or(EvalError::Overflow)
        }
    }
}

/// Recursive-descent evaluator over a token slice.
struct Evaluator<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Evaluator<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_op(&self, precedence: u8) -> Option<Op> {
        match self.peek() {
            Some(Token::Op(op)) if op.precedence() == precedence => Some(op),
            _ => None,
        }
    }

    fn session(&mut self) -> Result<i64, EvalError> {
        let mut value = self.additive(None)?;
        while self.peek() == Some(Token::Equals) {
            self.advance();
            if self.peek().is_none() {
                break;
            }
            value = self.additive(Some(value))?;
        }
        if self.peek().is_some() {
            return Err(EvalError::Incomplete);
        }
        Ok(value)
    }

    /// `seed` stands in for the first primary when continuing after `=`.
    fn additive(&mut self, seed: Option<i64>) -> Result<i64, EvalError> {
        let mut value = self.term(seed)?;
        while let Some(op) = self.peek_op(1) {
            self.advance();
            let rhs = self.term(None)?;
            value = apply(op, value, rhs)?;
        }
        Ok(value)
    }

    fn term(&mut self, seed: Option<i64>) -> Result<i64, EvalError> {
        let mut value = match seed {
            Some(v) => v,
            None => self.primary()?,
        };
        while let Some(op) = self.peek_op(2) {
            self.advance();
            let rhs = self.primary()?;
            value = apply(op, value, rhs)?;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<i64, EvalError> {
        match self.peek() {
            Some(Token::Digit(_)) => {
                let start = self.pos;
                while matches!(self.peek(), Some(Token::Digit(_))) {
                    self.pos += 1;
                }
                compose(&self.tokens[start..self.pos])
            }
            Some(Token::Open) => {
                self.advance();
                let value = self.additive(None)?;
                match self.advance() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(EvalError::Incomplete),
                }
            }
            _ => Err(EvalError::Incomplete),
        }
    }
}

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("result does not fit in 64 bits")]
    Overflow,

    #[error("expression is incomplete")]
    Incomplete,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ternary::Digit;

    /// Build tokens from key text like "12+(1*2)=".
    fn tokens(text: &str) -> Vec<Token> {
        text.chars()
            .map(|c| match c {
                '+' => Token::Op(Op::Add),
                '-' => Token::Op(Op::Sub),
                '*' => Token::Op(Op::Mul),
                '/' => Token::Op(Op::Div),
                '(' => Token::Open,
                ')' => Token::Close,
                '=' => Token::Equals,
                _ => Token::Digit(Digit::from_char(c).unwrap()),
            })
            .collect()
    }

    #[test]
    fn test_digit_composition() {
        assert_eq!(evaluate(&tokens("10")), Ok(3));
        assert_eq!(evaluate(&tokens("222")), Ok(26));
        assert_eq!(evaluate(&tokens("0012")), Ok(5));
    }

    #[test]
    fn test_precedence_and_associativity() {
        // 1 + 2 * 2 = 5
        assert_eq!(evaluate(&tokens("1+2*2")), Ok(5));
        // 12 - 2 - 1 = 5 - 2 - 1 = 2 (left to right)
        assert_eq!(evaluate(&tokens("12-2-1")), Ok(2));
        // 22 / 2 / 2 = 8 / 2 / 2 = 2
        assert_eq!(evaluate(&tokens("22/2/2")), Ok(2));
        // 2 - 10 = 2 - 3 = -1
        assert_eq!(evaluate(&tokens("2-10")), Ok(-1));
    }

    #[test]
    fn test_parentheses() {
        // (1 + 2) * 2 = 6
        assert_eq!(evaluate(&tokens("(1+2)*2")), Ok(6));
        // 2 * ((1 + 1) * 10) = 2 * (2 * 3) = 12
        assert_eq!(evaluate(&tokens("2*((1+1)*10)")), Ok(12));
        assert_eq!(evaluate(&tokens("((2))")), Ok(2));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        // 12 / 2 = 5 / 2 = 2
        assert_eq!(evaluate(&tokens("12/2")), Ok(2));
        // (0 - 12) / 2 = -5 / 2 = -2
        assert_eq!(evaluate(&tokens("(0-12)/2")), Ok(-2));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate(&tokens("1/0")), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate(&tokens("1/(1-1)")), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(apply(Op::Mul, i64::MAX, 2), Err(EvalError::Overflow));
        assert_eq!(apply(Op::Sub, i64::MIN, 1), Err(EvalError::Overflow));
        assert_eq!(apply(Op::Div, i64::MIN, -1), Err(EvalError::Overflow));
        let huge = "2".repeat(41);
        assert_eq!(evaluate(&tokens(&huge)), Err(EvalError::Overflow));
    }

    #[test]
    fn test_equals_seeds_next_operand() {
        // (1 + 1) * 2 + 1 = 5
        assert_eq!(evaluate(&tokens("1+1=*2+1")), Ok(5));
        assert_eq!(evaluate(&tokens("1+1=")), Ok(2));
        assert_eq!(evaluate(&tokens("2=-10=")), Ok(-1));
    }

    #[test]
    fn test_incomplete_sequences() {
        assert_eq!(evaluate(&tokens("")), Err(EvalError::Incomplete));
        assert_eq!(evaluate(&tokens("1+")), Err(EvalError::Incomplete));
        assert_eq!(evaluate(&tokens("(1")), Err(EvalError::Incomplete));
        assert_eq!(evaluate(&tokens("1)")), Err(EvalError::Incomplete));
    }

    #[test]
    fn test_complete_prefix_lens() {
        assert!(complete_prefix_lens(&tokens("")).is_empty());
        assert!(complete_prefix_lens(&tokens("(")).is_empty());
        assert_eq!(complete_prefix_lens(&tokens("10")), vec![1, 2]);
        assert_eq!(complete_prefix_lens(&tokens("10+")), vec![1, 2]);
        assert_eq!(complete_prefix_lens(&tokens("1+(2")), vec![1]);
        assert_eq!(complete_prefix_lens(&tokens("1+(2)")), vec![1, 5]);
        assert_eq!(complete_prefix_lens(&tokens("1+1=*")), vec![1, 3, 4]);
    }

    #[test]
    fn test_live_value_inside_groups() {
        assert_eq!(live_value(&tokens("")), 0);
        assert_eq!(live_value(&tokens("(")), 0);
        assert_eq!(live_value(&tokens("(12")), 5);
        assert_eq!(live_value(&tokens("(12+1")), 6);
        assert_eq!(live_value(&tokens("1+(")), 1);
        assert_eq!(live_value(&tokens("1+(22")), 8);
        assert_eq!(live_value(&tokens("1+(2+")), 2);
        assert_eq!(live_value(&tokens("(1+2)*(")), 3);
        assert_eq!(live_value(&tokens("((1)+(2")), 2);
        assert_eq!(live_value(&tokens("1+1=*2")), 4);
    }

    #[test]
    fn test_live_value_skips_failing_prefixes() {
        assert_eq!(live_value(&tokens("1/0")), 1);
        assert_eq!(live_value(&tokens("2+1/0")), 3);
        assert_eq!(live_value(&tokens("1+(2/0")), 2);
        // every prefix of the inner group fails, so the outer one is shown
        assert_eq!(live_value(&tokens("1+((2/0)")), 1);
    }

    #[test]
    fn test_trailing_operand() {
        assert_eq!(trailing_operand(&tokens("1+")), None);
        assert_eq!(trailing_operand(&tokens("1+21")), Some(Ok(7)));
        assert_eq!(trailing_operand(&tokens(&"2".repeat(41))), Some(Err(EvalError::Overflow)));
    }
}
