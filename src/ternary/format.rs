//! Base-3 text for signed 64-bit integers.
//!
//! Formatting writes digits right to left into a fixed 64-byte buffer.
//! An `i64` never needs more than 40 ternary digits (3^39 < 2^63 < 3^40),
//! so the sign and digits always fit with room to spare.

use std::fmt;
use crate::ternary::Digit;

/// Capacity of the formatting buffer in bytes.
pub const BUFFER_SIZE: usize = 64;

/// Largest number of ternary digits an `i64` magnitude can need.
pub const MAX_DIGITS: usize = 40;

/// Ternary text of one value, held in a fixed buffer.
///
/// The text occupies `bytes[start..]`; everything before `start` is unused.
#[derive(Clone, Copy)]
pub struct TernaryBuf {
    bytes: [u8; BUFFER_SIZE],
    start: usize,
}

impl TernaryBuf {
    /// Format `value` into a new buffer.
    pub fn new(value: i64) -> Self {
        let mut bytes = [0u8; BUFFER_SIZE];
        let mut pos = BUFFER_SIZE;

        // unsigned_abs keeps i64::MIN representable
        let mut magnitude = value.unsigned_abs();
        loop {
            pos -= 1;
            bytes[pos] = b'0' + (magnitude % 3) as u8;
            magnitude /= 3;
            if magnitude == 0 {
                break;
            }
        }
        if value < 0 {
            pos -= 1;
            bytes[pos] = b'-';
        }

        Self { bytes, start: pos }
    }

    /// The formatted text.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits and '-' are ever written.
        std::str::from_utf8(&self.bytes[self.start..]).unwrap_or_default()
    }

    /// Offset of the first character inside the buffer.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        BUFFER_SIZE - self.start
    }

    /// Always false: zero formats as "0".
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TernaryBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for TernaryBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TernaryBuf({:?})", self.as_str())
    }
}

/// Format a value as ternary text.
///
/// Negative values get a leading `-`; there are no leading zeros and zero
/// itself formats as `"0"`.
pub fn format(value: i64) -> String {
    TernaryBuf::new(value).as_str().to_owned()
}

/// Parse ternary text produced by [`format`] back into a value.
///
/// Accepts an optional leading `-` followed by at least one digit. Leading
/// zeros are tolerated.
pub fn parse(text: &str) -> Result<i64, ParseError> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if digits.is_empty() {
        return Err(ParseError::Empty);
    }

    // Accumulate as a negative number so that i64::MIN parses.
    let mut value: i64 = 0;
    for c in digits.chars() {
        let digit = Digit::from_char(c).ok_or(ParseError::InvalidChar(c))?;
        value = value
            .checked_mul(3)
            .and_then(|v| v.checked_sub(digit.value() as i64))
            .ok_or(ParseError::OutOfRange)?;
    }

    if negative {
        Ok(value)
    } else {
        value.checked_neg().ok_or(ParseError::OutOfRange)
    }
}

/// Errors from parsing ternary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No digits were given.
    Empty,
    /// A character other than `0`, `1`, `2` appeared among the digits.
    InvalidChar(char),
    /// The value does not fit in an `i64`.
    OutOfRange,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no ternary digits given"),
            ParseError::InvalidChar(c) => {
                write!(f, "invalid ternary digit: '{}' (expected 0/1/2)", c)
            }
            ParseError::OutOfRange => write!(f, "value does not fit in 64 bits"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_values() {
        assert_eq!(format(0), "0");
        assert_eq!(format(1), "1");
        assert_eq!(format(2), "2");
        assert_eq!(format(3), "10");
        assert_eq!(format(8), "22");
        assert_eq!(format(9), "100");
        assert_eq!(format(-1), "-1");
        assert_eq!(format(-5), "-12");
    }

    #[test]
    fn test_format_extremes_fit_buffer() {
        let max = TernaryBuf::new(i64::MAX);
        assert_eq!(max.len(), MAX_DIGITS);
        assert_eq!(max.as_str(), "2021110011022210012102010021220101220221");

        let min = TernaryBuf::new(i64::MIN);
        assert_eq!(min.len(), MAX_DIGITS + 1);
        assert!(min.as_str().starts_with('-'));
        assert_eq!(min.offset(), BUFFER_SIZE - MAX_DIGITS - 1);
    }

    #[test]
    fn test_display_matches_format() {
        for v in [-100, -3, 0, 7, 1_000_000] {
            assert_eq!(TernaryBuf::new(v).to_string(), format(v));
        }
        assert_eq!(format!("{:>4}", TernaryBuf::new(3)), "  10");
    }

    #[test]
    fn test_parse_roundtrip_extremes() {
        for v in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX] {
            assert_eq!(parse(&format(v)), Ok(v));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("-"), Err(ParseError::Empty));
        assert_eq!(parse("123"), Err(ParseError::InvalidChar('3')));
        assert_eq!(parse("1".repeat(60).as_str()), Err(ParseError::OutOfRange));
        assert_eq!(parse("0010"), Ok(3));
    }
}
