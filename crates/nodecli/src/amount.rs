//! Rendering of integer base units as decimal coin amounts.

use std::fmt;

/// Base units per whole coin.
const UNITS_PER_COIN: u128 = 100_000_000;

/// Number of fractional digits a coin amount can carry.
const DECIMALS: usize = 8;

/// An amount expressed in integer base units.
///
/// The value is held as `i128` so any integer a node reports, signed or
/// unsigned 64-bit, renders exactly.
///
/// `Display` renders whole coins with trailing fractional zeros removed but at
/// least one fractional digit kept:
///
/// ```
/// use nodecli::Amount;
///
/// assert_eq!(Amount::from_base_units(100_000_000).to_string(), "1.0");
/// assert_eq!(Amount::from_base_units(1).to_string(), "0.00000001");
/// assert_eq!(Amount::from_base_units(-150_000_000).to_string(), "-1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    /// Wraps a base-unit value.
    #[must_use]
    pub const fn from_base_units(units: i128) -> Self {
        Self(units)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / UNITS_PER_COIN;
        let fraction = format!("{:0width$}", magnitude % UNITS_PER_COIN, width = DECIMALS);
        let fraction = fraction.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };
        write!(f, "{sign}{whole}.{fraction}")
    }
}
