//! Single unbalanced ternary digit.
//!
//! A digit holds one of three values: 0, 1 or 2. Digits are typed most
//! significant first and shown with the characters `0`, `1` and `2`.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A single base-3 digit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Digit {
    /// Zero (0)
    #[default]
    Zero = 0,
    /// One (1)
    One = 1,
    /// Two (2)
    Two = 2,
}

impl Digit {
    /// All digits in ascending order.
    pub const ALL: [Digit; 3] = [Digit::Zero, Digit::One, Digit::Two];

    /// The radix digits belong to.
    pub const RADIX: u32 = 3;

    /// Create a digit from its numeric value, if it is below the radix.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Digit::Zero),
            1 => Some(Digit::One),
            2 => Some(Digit::Two),
            _ => None,
        }
    }

    /// Numeric value of the digit.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Parse a digit from its display character.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Digit::Zero),
            '1' => Some(Digit::One),
            '2' => Some(Digit::Two),
            _ => None,
        }
    }

    /// Display character of the digit.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Digit::Zero => '0',
            Digit::One => '1',
            Digit::Two => '2',
        }
    }

    /// Shift `acc` one place left and append this digit.
    ///
    /// Returns `None` when the result leaves the `i64` range.
    #[inline]
    pub fn append_to(self, acc: i64) -> Option<i64> {
        acc.checked_mul(Self::RADIX as i64)?
            .checked_add(self.value() as i64)
    }
}

impl fmt::Debug for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digit({})", self.value())
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<u8> for Digit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::from_u8(value).ok_or(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_roundtrip() {
        for d in Digit::ALL {
            assert_eq!(Digit::from_char(d.to_char()), Some(d));
        }
        assert_eq!(Digit::from_char('3'), None);
        assert_eq!(Digit::from_char('-'), None);
    }

    #[test]
    fn test_value_roundtrip() {
        for d in Digit::ALL {
            assert_eq!(Digit::try_from(d.value()), Ok(d));
        }
        assert_eq!(Digit::try_from(3), Err(3));
    }

    #[test]
    fn test_append_composes_base3() {
        // "102" = 1*9 + 0*3 + 2
        let value = [Digit::One, Digit::Zero, Digit::Two]
            .iter()
            .try_fold(0i64, |acc, d| d.append_to(acc));
        assert_eq!(value, Some(11));
    }

    #[test]
    fn test_append_overflow() {
        assert_eq!(Digit::Zero.append_to(i64::MAX), None);
        assert_eq!(Digit::Two.append_to(i64::MAX / 3), None);
        assert_eq!(Digit::One.append_to(i64::MAX / 3), Some(i64::MAX / 3 * 3 + 1));
    }
}
