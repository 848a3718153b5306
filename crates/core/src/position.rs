//! The single tracked option position of a trading day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a tracked position. `StoppedOut` and `TargetHit` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    Tracking,
    StoppedOut,
    TargetHit,
}

/// An entered option position with its exit band.
///
/// Created when a breakout is confirmed and an entry price is obtained;
/// mutated only by the position tracker. At most one per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub target: Decimal,
    pub status: PositionStatus,
}

impl Position {
    /// Opens a position at `entry_price` with a stop-loss/target band
    /// offset by the given point distances.
    #[must_use]
    pub fn open(
        symbol: String,
        entry_price: Decimal,
        stop_loss_points: Decimal,
        target_points: Decimal,
    ) -> Self {
        Self {
            symbol,
            entry_price,
            stop_loss: entry_price - stop_loss_points,
            target: entry_price + target_points,
            status: PositionStatus::Tracking,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            PositionStatus::StoppedOut | PositionStatus::TargetHit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn open_computes_exit_band() {
        let pos = Position::open(
            "NSE:NIFTY07AUG2522050CE".to_string(),
            dec!(120),
            dec!(25),
            dec!(50),
        );
        assert_eq!(pos.entry_price, dec!(120));
        assert_eq!(pos.stop_loss, dec!(95));
        assert_eq!(pos.target, dec!(170));
        assert_eq!(pos.status, PositionStatus::Tracking);
        assert!(!pos.is_terminal());
    }

    #[test]
    fn stopped_out_and_target_hit_are_terminal() {
        let mut pos = Position::open("X".to_string(), dec!(100), dec!(25), dec!(50));
        pos.status = PositionStatus::StoppedOut;
        assert!(pos.is_terminal());
        pos.status = PositionStatus::TargetHit;
        assert!(pos.is_terminal());
    }
}
