//! Strike and weekly contract symbol resolution.
//!
//! Pure functions — no network, no clock. Callers pass the reference date,
//! so the same (date, strike, side) always yields the same symbol.

use chrono::{Datelike, Duration, NaiveDate};
use orb_trade_core::OptionType;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Rounds the spot price to the nearest multiple of `step`.
///
/// Midpoints round to even (banker's rounding), e.g. with step 50 a spot of
/// 22025 rounds down to 22000 while 22075 rounds up to 22100.
///
/// Returns `None` if the result does not fit an `i64` — unusable data.
#[must_use]
pub fn nearest_strike(spot: Decimal, step: u32) -> Option<i64> {
    if step == 0 {
        return None;
    }
    let step = Decimal::from(step);
    ((spot / step).round() * step).to_i64()
}

/// The upcoming weekly expiry on or after `today`.
///
/// Weekly index options expire on Thursday; if `today` is a Thursday the
/// expiry is today itself.
#[must_use]
pub fn weekly_expiry(today: NaiveDate) -> NaiveDate {
    let weekday = i64::from(today.weekday().num_days_from_monday());
    let offset = (3 - weekday).rem_euclid(7);
    today + Duration::days(offset)
}

/// A weekly option contract identifier.
///
/// Renders as the fixed-width exchange form
/// `{underlying}{DD}{MMM}{YY}{strike}{CE|PE}`, e.g.
/// `NSE:NIFTY07AUG2522050CE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSymbol {
    pub underlying: String,
    pub expiry: NaiveDate,
    pub strike: i64,
    pub option_type: OptionType,
}

impl ContractSymbol {
    /// Builds the contract for the weekly expiry on or after `today`.
    #[must_use]
    pub fn weekly(
        underlying: impl Into<String>,
        today: NaiveDate,
        strike: i64,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            expiry: weekly_expiry(today),
            strike,
            option_type,
        }
    }
}

impl std::fmt::Display for ContractSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expiry_code = self.expiry.format("%d%b%y").to_string().to_uppercase();
        write!(
            f,
            "{}{}{}{}",
            self.underlying,
            expiry_code,
            self.strike,
            self.option_type.code()
        )
    }
}
