//! Turning two stop selections into a priced breakdown.
//!
//! The orchestrator decides whether a delivery stays on one route (route ids
//! compared, never display names), resolves both fares from the matching
//! dataset, and assembles the [`PriceBreakdown`] that order creation embeds
//! and the display screens render. All failures come back as values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::stop_id;
use crate::engine::{self, Fare, FareMode, CURRENCY};
use crate::normalize::canonical_stop_name;
use crate::tariff::Tariff;
use crate::FareError;

/// One side of a delivery as selected in the ordering flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSelection {
    pub route_id: String,
    pub route_name: String,
    pub stop_name: String,
}

impl StopSelection {
    pub fn new(
        route_id: impl Into<String>,
        route_name: impl Into<String>,
        stop_name: impl Into<String>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            route_name: route_name.into(),
            stop_name: stop_name.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.route_id.trim().is_empty()
            && !self.route_name.trim().is_empty()
            && !self.stop_name.trim().is_empty()
    }

    /// Stop identity for equality checks, derived from the canonicalized
    /// stop name so alias spellings of one stop compare equal.
    fn derived_stop_id(&self) -> String {
        stop_id(&self.route_name, &canonical_stop_name(&self.stop_name))
    }
}

/// Which leg of the delivery a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Pickup,
    Dropoff,
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leg::Pickup => write!(f, "pickup"),
            Leg::Dropoff => write!(f, "drop-off"),
        }
    }
}

/// Quoting failures. All recoverable; callers surface them to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("pickup and drop-off must both be selected")]
    MissingSelection,

    #[error("{leg} stop '{stop}' not found in fare data")]
    StopNotFound { leg: Leg, stop: String },

    #[error("route '{route}' has no fare table")]
    RouteNotFound { route: String },

    #[error("pickup and drop-off are the same stop")]
    SameStopSelected,
}

/// The itemized result of pricing one delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub is_same_route: bool,
    pub pickup_cost: f64,
    pub dropoff_cost: f64,
    /// 0 for same-route deliveries. For cross-route deliveries this carries
    /// the pre-fee base amount: the order schema has always stored the base
    /// here rather than a separate surcharge, and persisted records rely on
    /// that shape.
    pub transfer_fee: f64,
    /// `(pickup_cost + dropoff_cost) / divisor` at full precision.
    pub base_amount: f64,
    pub fixed_fee: f64,
    /// Full-precision base plus the fixed fee, truncated toward zero.
    pub total: i64,
    pub currency: String,
    pub breakdown: FormulaBreakdown,
}

/// Audit/display companion to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaBreakdown {
    /// e.g. `"((160 + 160) / 1.8) + 50"`.
    pub formula: String,
    /// Pre-fee base rounded to 2 decimals. Display only; `total` is never
    /// derived from this.
    pub base_calculation: f64,
}

/// Rejects a pickup/drop-off pair that resolves to the identical stop.
///
/// This is an order-validation precondition, not a pricing concern: callers
/// run it before quoting so the user sees the selection error rather than a
/// price of zero distance. Incomplete selections pass through; the
/// orchestrator reports those as [`QuoteError::MissingSelection`].
///
/// # Errors
///
/// Returns `QuoteError::SameStopSelected` when both legs share a route id
/// and derive the same stop id.
pub fn ensure_distinct_stops(
    pickup: &StopSelection,
    dropoff: &StopSelection,
) -> Result<(), QuoteError> {
    if !pickup.is_complete() || !dropoff.is_complete() {
        return Ok(());
    }
    if pickup.route_id == dropoff.route_id
        && pickup.derived_stop_id() == dropoff.derived_stop_id()
    {
        return Err(QuoteError::SameStopSelected);
    }
    Ok(())
}

/// Prices deliveries against an injected immutable [`Tariff`].
#[derive(Debug, Clone, Copy)]
pub struct Quoter<'a> {
    tariff: &'a Tariff,
}

impl<'a> Quoter<'a> {
    #[must_use]
    pub fn new(tariff: &'a Tariff) -> Self {
        Self { tariff }
    }

    /// Compute the price breakdown for a delivery between two selections.
    ///
    /// Same-route deliveries (route ids equal) resolve both fares from the
    /// pickup route's fare table; cross-route deliveries resolve both from
    /// the hub dataset by stop name alone. A lookup miss names the failing
    /// leg and the attempted stop name; there is no default-price fallback.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError`] for incomplete selections, identical stops,
    /// or unresolvable fares.
    pub fn quote(
        &self,
        pickup: &StopSelection,
        dropoff: &StopSelection,
    ) -> Result<PriceBreakdown, QuoteError> {
        if !pickup.is_complete() || !dropoff.is_complete() {
            return Err(QuoteError::MissingSelection);
        }
        ensure_distinct_stops(pickup, dropoff)?;

        let is_same_route = pickup.route_id == dropoff.route_id;
        let (pickup_fare, dropoff_fare, mode) = if is_same_route {
            // Matching route ids imply both legs share the pickup's
            // route name.
            (
                self.route_fare(&pickup.route_name, pickup, Leg::Pickup)?,
                self.route_fare(&pickup.route_name, dropoff, Leg::Dropoff)?,
                FareMode::SameRoute,
            )
        } else {
            (
                self.cbd_fare(pickup, Leg::Pickup)?,
                self.cbd_fare(dropoff, Leg::Dropoff)?,
                FareMode::CrossRoute,
            )
        };

        let quoted = engine::price(pickup_fare, dropoff_fare, mode);

        Ok(PriceBreakdown {
            is_same_route,
            pickup_cost: pickup_fare.amount(),
            dropoff_cost: dropoff_fare.amount(),
            transfer_fee: if is_same_route { 0.0 } else { quoted.base },
            base_amount: quoted.base,
            fixed_fee: quoted.fixed_fee,
            total: quoted.total,
            currency: CURRENCY.to_string(),
            breakdown: FormulaBreakdown {
                formula: quoted.formula,
                base_calculation: quoted.base_display,
            },
        })
    }

    fn route_fare(
        &self,
        route_name: &str,
        selection: &StopSelection,
        leg: Leg,
    ) -> Result<Fare, QuoteError> {
        self.tariff
            .route_fare(route_name, &selection.stop_name)
            .map_err(|e| match e {
                FareError::RouteNotFound(route) => QuoteError::RouteNotFound { route },
                _ => QuoteError::StopNotFound {
                    leg,
                    stop: selection.stop_name.clone(),
                },
            })
    }

    fn cbd_fare(&self, selection: &StopSelection, leg: Leg) -> Result<Fare, QuoteError> {
        self.tariff.cbd_fare(&selection.stop_name).map_err(|_| {
            QuoteError::StopNotFound {
                leg,
                stop: selection.stop_name.clone(),
            }
        })
    }
}
