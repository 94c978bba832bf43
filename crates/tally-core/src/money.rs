//! # Money Module
//!
//! Provides the `Money` type for reading receipt amounts exactly.
//!
//! ## Why Not Floats?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    35.35 % 0.25  = 0.0999999999999997  (is it a multiple?)             │
//! │    0.35 * 0.2    = 0.06999999999999999 (ceil is fine... this time)     │
//! │                                                                         │
//! │  OUR SOLUTION: Scaled Integers                                          │
//! │    "35.35" → 3535 × 10^-2                                               │
//! │    "1.005" → 1005 × 10^-3                                               │
//! │    "1e2"   → 100  × 10^0                                                │
//! │    3535 % 25 = 10 → not a multiple of 0.25, no doubt about it          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let total: Money = "35.35".parse().unwrap();
//! assert_eq!(total, Money::from_cents(3535));
//! assert!(!total.is_whole_units());
//!
//! let price = Money::from_cents(1225);           // 12.25
//! assert_eq!(price.ceil_units_at_rate(2000), 3); // ceil(12.25 × 20%)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::MoneyParseError;

/// Decimal places carried by a cents value.
const CENT_SCALE: u32 = 2;

/// Most decimal places an amount may carry.
pub const MAX_SCALE: u32 = 18;

/// Largest mantissa magnitude (37 significant digits).
const MAX_MANTISSA: u128 = 10u128.pow(37);

/// Decimal places in a basis-point rate (10000 bps = 1).
const BPS_SCALE: u32 = 4;

// =============================================================================
// Money Type
// =============================================================================

/// An exact decimal amount: `mantissa × 10^-scale`.
///
/// ## Design Decisions
/// - **Normalized**: no trailing zeros in the mantissa while `scale > 0`, so
///   `1.50` and `1.5` are the same value and derived `Eq`/`Hash` hold
/// - **Signed**: receipts are not validated, so negative amounts parse
/// - **Bounded**: `|mantissa| ≤ 10^37` and `scale ≤ 18`, which keeps every
///   operation below in i128/u128 range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    mantissa: i128,
    scale: u32,
}

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self::normalized(cents as i128, CENT_SCALE)
    }

    const fn normalized(mut mantissa: i128, mut scale: u32) -> Self {
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Money { mantissa, scale }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money {
            mantissa: 0,
            scale: 0,
        }
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// True when there is no fractional part (`12.00`, `-3`, `1e2`).
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert!(Money::from_cents(1200).is_whole_units());
    /// assert!(!Money::from_cents(1225).is_whole_units());
    /// ```
    #[inline]
    pub const fn is_whole_units(&self) -> bool {
        self.scale == 0
    }

    /// True when the value is an exact multiple of `step`.
    ///
    /// A zero step only divides zero.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let quarter = Money::from_cents(25);
    /// assert!(Money::from_cents(175).is_multiple_of(quarter));
    /// assert!(!Money::from_cents(140).is_multiple_of(quarter));
    /// ```
    pub fn is_multiple_of(&self, step: Money) -> bool {
        if step.mantissa == 0 {
            return self.mantissa == 0;
        }
        if self.mantissa == 0 {
            return true;
        }

        let value = self.mantissa.unsigned_abs();
        let divisor = step.mantissa.unsigned_abs();

        if step.scale >= self.scale {
            // value × 10^k must divide by the step mantissa
            let mut rem = value % divisor;
            for _ in 0..(step.scale - self.scale) {
                rem = rem * 10 % divisor;
            }
            rem == 0
        } else {
            match 10u128
                .checked_pow(self.scale - step.scale)
                .and_then(|p| divisor.checked_mul(p))
            {
                Some(divisor) => value % divisor == 0,
                // Larger than any amount, and the value is not zero
                None => false,
            }
        }
    }

    /// Applies a rate in basis points and rounds UP to whole currency units.
    ///
    /// ## Implementation
    /// Exact integer math: `ceil(mantissa × bps / 10^(scale + 4))`, split
    /// into quotient and remainder first so nothing overflows. Rounding is
    /// toward positive infinity for negative amounts as well.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// // 6.49 × 20% = 1.298 → 2
    /// assert_eq!(Money::from_cents(649).ceil_units_at_rate(2000), 2);
    /// // 1.00 × 20% = 0.2 → 1
    /// assert_eq!(Money::from_cents(100).ceil_units_at_rate(2000), 1);
    /// // 5.00 × 20% = 1.0 → 1 (already whole)
    /// assert_eq!(Money::from_cents(500).ceil_units_at_rate(2000), 1);
    /// ```
    pub fn ceil_units_at_rate(&self, bps: u32) -> i64 {
        let bps = bps as i128;
        let denominator = 10i128.pow(self.scale + BPS_SCALE);

        let quotient = self.mantissa.div_euclid(denominator);
        let remainder = self.mantissa.rem_euclid(denominator);
        let ceiled_remainder = (remainder * bps + denominator - 1) / denominator;

        quotient
            .saturating_mul(bps)
            .saturating_add(ceiled_remainder)
            .clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal strings such as `"35.35"`, `"9"`, `"-1.5"`, `".25"`,
/// `"1.005"` or `"1e2"`.
///
/// ## Rules
/// - Optional leading `+` or `-`
/// - Digits, optionally followed by `.` and more digits (at least one digit overall)
/// - Optional exponent: `e` or `E`, an optional sign, then digits
/// - No whitespace, thousands separators, `inf`, `nan` or hex forms
/// - At most 37 significant digits and 18 decimal places, else `OutOfRange`
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(input.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(input.to_string());

        let (negative, unsigned) = split_sign(input);

        let (significand, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
            None => (unsigned, None),
        };

        let (whole, fraction) = significand.split_once('.').unwrap_or((significand, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let exponent = match exponent {
            Some(digits) => parse_exponent(digits).ok_or_else(invalid)?,
            None => 0,
        };

        let fraction = fraction.trim_end_matches('0');

        let mut magnitude: u128 = 0;
        for digit in whole.bytes().chain(fraction.bytes()) {
            magnitude = magnitude * 10 + (digit - b'0') as u128;
            if magnitude > MAX_MANTISSA {
                return Err(out_of_range());
            }
        }
        if magnitude == 0 {
            return Ok(Money::zero());
        }

        let mut scale = (fraction.len() as i64).saturating_sub(exponent);
        while scale > 0 && magnitude % 10 == 0 {
            magnitude /= 10;
            scale -= 1;
        }

        if scale < 0 {
            let shift = u32::try_from(-scale).map_err(|_| out_of_range())?;
            magnitude = 10u128
                .checked_pow(shift)
                .and_then(|p| magnitude.checked_mul(p))
                .filter(|m| *m <= MAX_MANTISSA)
                .ok_or_else(out_of_range)?;
            scale = 0;
        }
        if scale > MAX_SCALE as i64 {
            return Err(out_of_range());
        }

        let mantissa = magnitude as i128;
        Ok(Money {
            mantissa: if negative { -mantissa } else { mantissa },
            scale: scale as u32,
        })
    }
}

fn split_sign(input: &str) -> (bool, &str) {
    match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// `None` for a malformed exponent. Huge exponents saturate.
fn parse_exponent(input: &str) -> Option<i64> {
    let (negative, digits) = split_sign(input);
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount the way receipts write it, with at least two decimal
/// places (`35.35`, `-5.50`, `1.005`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        let digits = format!(
            "{:0>width$}",
            self.mantissa.unsigned_abs(),
            width = scale + 1
        );
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        write!(f, "{}{}.{:0<2}", sign, whole, fraction)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Money, MoneyParseError> {
        s.parse()
    }

    fn decimal(mantissa: i128, scale: u32) -> Money {
        Money { mantissa, scale }
    }

    #[test]
    fn test_parse_receipt_amounts() {
        assert_eq!(parse("35.35").unwrap(), Money::from_cents(3535));
        assert_eq!(parse("6.49").unwrap(), Money::from_cents(649));
        assert_eq!(parse("12.00").unwrap(), Money::from_cents(1200));
        assert_eq!(parse("0").unwrap(), Money::zero());
        assert_eq!(parse("9").unwrap(), Money::from_cents(900));
    }

    #[test]
    fn test_parse_short_and_signed_forms() {
        assert_eq!(parse("1.5").unwrap(), Money::from_cents(150));
        assert_eq!(parse(".25").unwrap(), Money::from_cents(25));
        assert_eq!(parse("3.").unwrap(), Money::from_cents(300));
        assert_eq!(parse("-5.50").unwrap(), Money::from_cents(-550));
        assert_eq!(parse("+2.10").unwrap(), Money::from_cents(210));
        assert_eq!(parse("1.2500").unwrap(), Money::from_cents(125));
        assert_eq!(parse("-0.00").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_sub_cent_amounts() {
        assert_eq!(parse("1.005").unwrap(), decimal(1005, 3));
        assert_eq!(parse("2.001").unwrap(), decimal(2001, 3));
        assert_eq!(parse("0.0001").unwrap(), decimal(1, 4));
    }

    #[test]
    fn test_parse_exponents() {
        assert_eq!(parse("1e2").unwrap(), Money::from_cents(10_000));
        assert_eq!(parse("1E2").unwrap(), Money::from_cents(10_000));
        assert_eq!(parse("2.5e-1").unwrap(), Money::from_cents(25));
        assert_eq!(parse("125e-2").unwrap(), Money::from_cents(125));
        assert_eq!(parse("-1.5e+1").unwrap(), Money::from_cents(-1500));
        assert_eq!(parse("0e999999999999999999999").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), Err(MoneyParseError::Empty));
        for input in [
            ".", "-", "abc", " 1.00", "1,000.00", "1.2.3", "e5", "1e", "1e+", "1e2.5", "inf",
            "NaN", "0x1p3", "1_000",
        ] {
            assert!(
                matches!(parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        for input in [
            "99999999999999999999999999999999999999",
            "1e38",
            "1e-19",
            "1e99999999999999999999",
        ] {
            assert!(
                matches!(parse(input), Err(MoneyParseError::OutOfRange(_))),
                "{input} should be out of range"
            );
        }
        assert_eq!(parse("1e-18").unwrap(), decimal(1, 18));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(3535).to_string(), "35.35");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(parse("1.005").unwrap().to_string(), "1.005");
        assert_eq!(parse("-0.0001").unwrap().to_string(), "-0.0001");
    }

    #[test]
    fn test_whole_units_and_multiples() {
        let quarter = Money::from_cents(25);

        assert!(Money::from_cents(100).is_whole_units());
        assert!(Money::from_cents(-300).is_whole_units());
        assert!(parse("1e2").unwrap().is_whole_units());
        assert!(!Money::from_cents(175).is_whole_units());
        assert!(!parse("2.001").unwrap().is_whole_units());

        assert!(Money::from_cents(100).is_multiple_of(quarter));
        assert!(Money::from_cents(175).is_multiple_of(quarter));
        assert!(Money::from_cents(-75).is_multiple_of(quarter));
        assert!(!Money::from_cents(140).is_multiple_of(quarter));
        assert!(!Money::from_cents(3535).is_multiple_of(quarter));
        assert!(!parse("2.001").unwrap().is_multiple_of(quarter));
        assert!(parse("1e30").unwrap().is_multiple_of(quarter));

        assert!(Money::zero().is_multiple_of(Money::zero()));
        assert!(!Money::from_cents(5).is_multiple_of(Money::zero()));
    }

    #[test]
    fn test_ceil_units_at_rate() {
        // 20% of each Target receipt price
        assert_eq!(Money::from_cents(649).ceil_units_at_rate(2000), 2);
        assert_eq!(Money::from_cents(1225).ceil_units_at_rate(2000), 3);
        assert_eq!(Money::from_cents(126).ceil_units_at_rate(2000), 1);
        assert_eq!(Money::from_cents(335).ceil_units_at_rate(2000), 1);
        assert_eq!(Money::from_cents(1200).ceil_units_at_rate(2000), 3);

        assert_eq!(Money::zero().ceil_units_at_rate(2000), 0);
        assert_eq!(Money::from_cents(500).ceil_units_at_rate(2000), 1);
        assert_eq!(Money::from_cents(501).ceil_units_at_rate(2000), 2);
    }

    #[test]
    fn test_ceil_units_at_rate_beyond_cents() {
        // 1.005 × 20% = 0.201 → 1
        assert_eq!(parse("1.005").unwrap().ceil_units_at_rate(2000), 1);
        // 1e2 × 20% = 20
        assert_eq!(parse("1e2").unwrap().ceil_units_at_rate(2000), 20);
        // 5.000000000000000001 × 20% is just over 1 → 2
        assert_eq!(
            parse("5.000000000000000001").unwrap().ceil_units_at_rate(2000),
            2
        );
        assert_eq!(
            parse("1e36").unwrap().ceil_units_at_rate(2000),
            i64::MAX
        );
    }

    #[test]
    fn test_ceil_units_at_rate_negative_rounds_up() {
        // -1.00 × 20% = -0.2 → 0
        assert_eq!(Money::from_cents(-100).ceil_units_at_rate(2000), 0);
        // -10.00 × 20% = -2.0 → -2
        assert_eq!(Money::from_cents(-1000).ceil_units_at_rate(2000), -2);
        // -1.005 × 20% = -0.201 → 0
        assert_eq!(parse("-1.005").unwrap().ceil_units_at_rate(2000), 0);
    }
}
