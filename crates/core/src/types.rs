//! Market data types shared across the workspace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLC bar. Sequences are chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Last traded price for a symbol. Transient — re-fetched each poll, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub last_price: Decimal,
}

/// Option side, with the exchange suffix used in contract symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Contract symbol suffix ("CE" / "PE").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }

    /// Human-readable side label used in alerts ("CALL" / "PUT").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Put => "PUT",
        }
    }
}

/// High/low band derived from the first few candles of the trading day.
///
/// Computed once per day and immutable afterward. `high >= low` — the
/// constructor in the strategy crate rejects data that violates this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningRange {
    pub high: Decimal,
    pub low: Decimal,
}

impl OpeningRange {
    /// Which side, if any, the spot price has broken out of.
    ///
    /// Boundaries are exclusive: a spot exactly at the high or low is
    /// still inside the range.
    #[must_use]
    pub fn breakout(&self, spot: Decimal) -> Option<OptionType> {
        if spot > self.high {
            Some(OptionType::Call)
        } else if spot < self.low {
            Some(OptionType::Put)
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains(&self, spot: Decimal) -> bool {
        self.breakout(spot).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn range() -> OpeningRange {
        OpeningRange {
            high: dec!(22050),
            low: dec!(21950),
        }
    }

    #[test]
    fn spot_above_high_is_call_breakout() {
        assert_eq!(range().breakout(dec!(22060)), Some(OptionType::Call));
    }

    #[test]
    fn spot_below_low_is_put_breakout() {
        assert_eq!(range().breakout(dec!(21940)), Some(OptionType::Put));
    }

    #[test]
    fn spot_inside_range_is_no_breakout() {
        assert_eq!(range().breakout(dec!(22000)), None);
        assert!(range().contains(dec!(22000)));
    }

    #[test]
    fn boundary_spots_are_inside_range() {
        // Strictly greater / strictly less — touching the band is not a breakout.
        assert_eq!(range().breakout(dec!(22050)), None);
        assert_eq!(range().breakout(dec!(21950)), None);
    }

    #[test]
    fn option_type_codes() {
        assert_eq!(OptionType::Call.code(), "CE");
        assert_eq!(OptionType::Put.code(), "PE");
        assert_eq!(OptionType::Call.label(), "CALL");
        assert_eq!(OptionType::Put.label(), "PUT");
    }
}
