//! Base-N digit strings to exact integers and back.

use std::fmt;

use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Digit symbols in value order. Matching is case-insensitive.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A base in `[2, 36]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radix(u32);

impl Radix {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = ALPHABET.len() as u32;

    /// Validate `base`. Anything outside `[2, 36]`, negative values included, is rejected.
    pub fn new(base: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&base) {
            Ok(Radix(base as u32))
        } else {
            Err(Error::InvalidBase(base))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Every supported base, smallest first.
    pub fn all() -> impl Iterator<Item = Radix> {
        (Self::MIN..=Self::MAX).map(Radix)
    }

    /// Value of `c` in this base.
    pub fn digit_value(self, c: char) -> Result<u32> {
        let folded = c.to_ascii_lowercase();
        ALPHABET
            .iter()
            .position(|&d| char::from(d) == folded)
            .map(|v| v as u32)
            .filter(|&v| v < self.0)
            .ok_or(Error::InvalidDigit {
                digit: c,
                base: self.0,
            })
    }
}

impl TryFrom<i64> for Radix {
    type Error = Error;

    fn try_from(base: i64) -> Result<Self> {
        Radix::new(base)
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse `digits` in `base`, most significant digit first.
///
/// The empty string accumulates nothing and parses to zero.
pub fn parse(digits: &str, base: i64) -> Result<BigUint> {
    parse_radix(digits, Radix::new(base)?)
}

/// Same as [`parse`] with an already validated base.
pub fn parse_radix(digits: &str, radix: Radix) -> Result<BigUint> {
    let mut result = BigUint::zero();
    for c in digits.chars() {
        let digit = radix.digit_value(c)?;
        // result = result * base + digit
        result = result * radix.get() + digit;
    }
    Ok(result)
}

/// Render `value` as lower-case digits in `radix`.
pub fn render(value: &BigUint, radix: Radix) -> String {
    value.to_str_radix(radix.get())
}
