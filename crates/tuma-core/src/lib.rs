//! Pricing core for route-based deliveries.
//!
//! Orders are placed between two stops on predefined transit routes. This
//! crate canonicalizes stop names, resolves each stop's fare from one of two
//! static datasets (hub-centric for cross-route deliveries, per-route for
//! same-route deliveries), and computes a final price with an itemized
//! breakdown. Everything is synchronous, pure computation over a [`Tariff`]
//! built once at startup; persistence, payments, and transport of the result
//! belong to the callers.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod quote;
pub mod tariff;

pub use app_config::{AppConfig, Environment};
pub use catalog::{stop_id, Catalog, Route, RouteDef, Stop};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine::{
    price, Fare, FareMode, FareQuote, CROSS_ROUTE_DIVISOR, CURRENCY, FIXED_FEE, SAME_ROUTE_DIVISOR,
};
pub use normalize::canonical_stop_name;
pub use quote::{
    ensure_distinct_stops, FormulaBreakdown, Leg, PriceBreakdown, QuoteError, Quoter,
    StopSelection,
};
pub use tariff::{load_pricing, FareEntry, PricingFile, RouteFaresDef, Tariff};

use thiserror::Error;

/// Errors raised while loading configuration, either from environment
/// variables or from the pricing data file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pricing file {path}: {source}")]
    PricingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pricing file: {0}")]
    PricingFileParse(#[from] serde_yaml::Error),

    #[error("invalid pricing config: {0}")]
    Validation(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when resolving or validating a fare amount.
///
/// Lookup misses are ordinary values, never panics; callers decide whether a
/// missing route is distinguishable from a missing stop in their messaging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    #[error("route '{0}' has no fare table")]
    RouteNotFound(String),

    #[error("stop '{0}' has no fare entry")]
    StopNotFound(String),

    #[error("fare amount {0} must be a positive finite number")]
    InvalidAmount(f64),
}
