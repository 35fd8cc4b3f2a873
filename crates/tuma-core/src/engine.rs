//! The pricing formulas.
//!
//! Both delivery modes share one formula shape, `(pickup + dropoff) /
//! divisor + fixed fee`, differing only in the divisor. The final total is
//! the full-precision result truncated toward zero; the 2-decimal rounding
//! of the base amount exists for display only and must never feed into the
//! total, since rounding first can shift the integer result.

use serde::{Deserialize, Serialize};

use crate::FareError;

/// Divisor applied when pickup and drop-off share a route.
pub const SAME_ROUTE_DIVISOR: f64 = 1.8;

/// Divisor applied when pickup and drop-off are on different routes.
pub const CROSS_ROUTE_DIVISOR: f64 = 2.0;

/// Flat amount added to every computed base price.
pub const FIXED_FEE: f64 = 50.0;

/// ISO 4217 code for all computed prices.
pub const CURRENCY: &str = "KES";

/// Which formula variant applies to a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareMode {
    SameRoute,
    CrossRoute,
}

impl FareMode {
    #[must_use]
    pub fn divisor(self) -> f64 {
        match self {
            FareMode::SameRoute => SAME_ROUTE_DIVISOR,
            FareMode::CrossRoute => CROSS_ROUTE_DIVISOR,
        }
    }
}

/// A validated fare amount: finite and strictly positive.
///
/// Construction is the validation boundary; [`price`] assumes its inputs
/// went through it and has no failure path of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fare(f64);

impl Fare {
    /// # Errors
    ///
    /// Returns `FareError::InvalidAmount` for NaN, infinite, zero, or
    /// negative amounts.
    pub fn new(amount: f64) -> Result<Self, FareError> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(FareError::InvalidAmount(amount))
        }
    }

    #[must_use]
    pub fn amount(self) -> f64 {
        self.0
    }
}

/// The engine's result: the full-precision base, its display rounding, the
/// truncated total, and the formula string retained for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    pub mode: FareMode,
    /// `(pickup + dropoff) / divisor` at full precision.
    pub base: f64,
    /// `base` rounded to 2 decimals. Display only.
    pub base_display: f64,
    pub fixed_fee: f64,
    /// `trunc(base + fixed_fee)`, truncation applied to the full-precision
    /// value.
    pub total: i64,
    /// e.g. `"((160 + 160) / 1.8) + 50"`.
    pub formula: String,
}

/// Price a delivery from two validated fares.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn price(pickup: Fare, dropoff: Fare, mode: FareMode) -> FareQuote {
    let divisor = mode.divisor();
    let base = (pickup.amount() + dropoff.amount()) / divisor;
    let total = (base + FIXED_FEE).trunc() as i64;
    let formula = format!(
        "(({} + {}) / {divisor}) + {FIXED_FEE}",
        pickup.amount(),
        dropoff.amount()
    );

    FareQuote {
        mode,
        base,
        base_display: round2(base),
        fixed_fee: FIXED_FEE,
        total,
        formula,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
