//! Fare datasets and the pricing data file.
//!
//! Two independent read-only datasets back the pricing engine:
//!
//! - hub fares: cost from the central business district to a stop, used
//!   when pickup and drop-off are on different routes;
//! - route fares: cost from a route's own origin to a stop, used when both
//!   legs share a route.
//!
//! Both are indexed at load time by canonicalized stop name, so lookups are
//! a map probe rather than a scan. Route names are matched exactly; only
//! stop names go through normalization.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, RouteDef};
use crate::engine::Fare;
use crate::normalize::canonical_stop_name;
use crate::{ConfigError, FareError};

/// One stop's fare as written in the pricing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareEntry {
    pub stop: String,
    pub price: f64,
}

/// A route's fare table: cost from the route origin to each listed stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFaresDef {
    pub route: String,
    pub stops: Vec<FareEntry>,
}

/// The on-disk pricing data: route catalog plus both fare datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingFile {
    pub routes: Vec<RouteDef>,
    pub cbd_fares: Vec<FareEntry>,
    pub route_fares: Vec<RouteFaresDef>,
}

/// Load and validate the pricing data from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_pricing(path: &Path) -> Result<PricingFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PricingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: PricingFile = serde_yaml::from_str(&content)?;

    // Construction performs full validation; the parsed file is returned so
    // callers can inspect the raw definitions too.
    Tariff::from_config(&file)?;

    Ok(file)
}

/// The immutable fare snapshot the rest of the crate computes over.
///
/// Built once at startup; quoting borrows it and never mutates it, so
/// concurrent use needs no locking. Replacing the data means building a new
/// `Tariff` and swapping the snapshot whole.
#[derive(Debug, Clone)]
pub struct Tariff {
    catalog: Catalog,
    cbd: HashMap<String, Fare>,
    by_route: HashMap<String, HashMap<String, Fare>>,
}

impl Tariff {
    /// Load a tariff straight from a pricing YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on read, parse, or validation failure.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PricingFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: PricingFile = serde_yaml::from_str(&content)?;
        Self::from_config(&file)
    }

    /// Build and validate a tariff from parsed pricing data.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on non-positive or non-finite
    /// fares, duplicate normalized stop entries within a dataset scope,
    /// fare tables referencing unknown routes, or an invalid route catalog.
    pub fn from_config(file: &PricingFile) -> Result<Self, ConfigError> {
        let cbd = index_fares("cbd_fares", &file.cbd_fares)?;

        let route_names: HashSet<&str> = file.routes.iter().map(|r| r.name.as_str()).collect();
        let mut by_route: HashMap<String, HashMap<String, Fare>> =
            HashMap::with_capacity(file.route_fares.len());
        for def in &file.route_fares {
            if !route_names.contains(def.route.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "fare table references unknown route '{}'",
                    def.route
                )));
            }
            let scope = format!("route_fares for '{}'", def.route);
            let indexed = index_fares(&scope, &def.stops)?;
            if by_route.insert(def.route.clone(), indexed).is_some() {
                return Err(ConfigError::Validation(format!(
                    "duplicate fare table for route '{}'",
                    def.route
                )));
            }
        }

        let catalog = Catalog::build(&file.routes, |route, stop| {
            by_route
                .get(route)
                .and_then(|stops| stops.get(&canonical_stop_name(stop)))
                .map(|fare| fare.amount())
        })?;

        Ok(Self {
            catalog,
            cbd,
            by_route,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fare from the central business district to the named stop.
    ///
    /// # Errors
    ///
    /// Returns `FareError::StopNotFound` when the normalized name has no
    /// entry in the hub dataset.
    pub fn cbd_fare(&self, stop_name: &str) -> Result<Fare, FareError> {
        match self.cbd.get(&canonical_stop_name(stop_name)) {
            Some(fare) => Ok(*fare),
            None => {
                tracing::warn!(stop = %stop_name, "no hub fare entry for stop");
                Err(FareError::StopNotFound(stop_name.to_string()))
            }
        }
    }

    /// Fare from the named route's origin to the named stop.
    ///
    /// # Errors
    ///
    /// Returns `FareError::RouteNotFound` when no fare table exists for the
    /// route (exact name match), `FareError::StopNotFound` when the table
    /// exists but the normalized stop name has no entry.
    pub fn route_fare(&self, route_name: &str, stop_name: &str) -> Result<Fare, FareError> {
        let Some(stops) = self.by_route.get(route_name) else {
            tracing::warn!(route = %route_name, "no fare table for route");
            return Err(FareError::RouteNotFound(route_name.to_string()));
        };
        match stops.get(&canonical_stop_name(stop_name)) {
            Some(fare) => Ok(*fare),
            None => {
                tracing::warn!(route = %route_name, stop = %stop_name, "no route fare entry for stop");
                Err(FareError::StopNotFound(stop_name.to_string()))
            }
        }
    }
}

fn index_fares(scope: &str, entries: &[FareEntry]) -> Result<HashMap<String, Fare>, ConfigError> {
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        if entry.stop.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{scope} contains an empty stop name"
            )));
        }
        let fare = Fare::new(entry.price).map_err(|e| {
            ConfigError::Validation(format!("{scope} stop '{}': {e}", entry.stop))
        })?;
        let key = canonical_stop_name(&entry.stop);
        if map.insert(key.clone(), fare).is_some() {
            return Err(ConfigError::Validation(format!(
                "duplicate fare entry for stop '{key}' in {scope}"
            )));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
routes:
  - name: Thika Road
    stops: [Ngara, Allsops, Roysambu]
  - name: Ngong Road
    stops: [Kilimani, Adams Arcade]
cbd_fares:
  - { stop: Ngara, price: 50 }
  - { stop: Allsops, price: 160 }
  - { stop: Roysambu, price: 180 }
  - { stop: Kilimani, price: 80 }
  - { stop: Adams Arcade, price: 100 }
route_fares:
  - route: Thika Road
    stops:
      - { stop: Ngara, price: 40 }
      - { stop: Allsops, price: 160 }
      - { stop: Roysambu, price: 170 }
  - route: Ngong Road
    stops:
      - { stop: Kilimani, price: 70 }
      - { stop: Adams Arcade, price: 90 }
";

    fn sample() -> Tariff {
        let file: PricingFile = serde_yaml::from_str(SAMPLE).unwrap();
        Tariff::from_config(&file).unwrap()
    }

    #[test]
    fn cbd_fare_hits_by_canonical_name() {
        let tariff = sample();
        assert_eq!(tariff.cbd_fare("Allsops").unwrap().amount(), 160.0);
        // Alias variant resolves to the same entry.
        assert_eq!(tariff.cbd_fare("All Sops").unwrap().amount(), 160.0);
        assert_eq!(tariff.cbd_fare("  Allsops ").unwrap().amount(), 160.0);
    }

    #[test]
    fn cbd_fare_miss_is_a_value() {
        let tariff = sample();
        assert_eq!(
            tariff.cbd_fare("Juja"),
            Err(FareError::StopNotFound("Juja".to_string()))
        );
    }

    #[test]
    fn route_fare_distinguishes_missing_route_from_missing_stop() {
        let tariff = sample();
        assert_eq!(
            tariff.route_fare("Mombasa Road", "Allsops"),
            Err(FareError::RouteNotFound("Mombasa Road".to_string()))
        );
        assert_eq!(
            tariff.route_fare("Thika Road", "Kilimani"),
            Err(FareError::StopNotFound("Kilimani".to_string()))
        );
        assert_eq!(
            tariff.route_fare("Thika Road", "Allsopps").unwrap().amount(),
            160.0
        );
    }

    #[test]
    fn route_names_are_matched_exactly() {
        let tariff = sample();
        assert!(matches!(
            tariff.route_fare("thika road", "Allsops"),
            Err(FareError::RouteNotFound(_))
        ));
    }

    #[test]
    fn catalog_stops_carry_origin_fares() {
        let tariff = sample();
        let thika = tariff.catalog().route_by_name("Thika Road").unwrap();
        assert_eq!(thika.stops[1].name, "Allsops");
        assert_eq!(thika.stops[1].fare, Some(160.0));
    }

    #[test]
    fn rejects_non_positive_fare() {
        let mut file: PricingFile = serde_yaml::from_str(SAMPLE).unwrap();
        file.cbd_fares[0].price = 0.0;
        let err = Tariff::from_config(&file).unwrap_err();
        assert!(err.to_string().contains("positive finite"));
    }

    #[test]
    fn rejects_fare_table_for_unknown_route() {
        let mut file: PricingFile = serde_yaml::from_str(SAMPLE).unwrap();
        file.route_fares[0].route = "Jogoo Road".to_string();
        let err = Tariff::from_config(&file).unwrap_err();
        assert!(err.to_string().contains("unknown route 'Jogoo Road'"));
    }

    #[test]
    fn rejects_duplicate_normalized_stop_entries() {
        let mut file: PricingFile = serde_yaml::from_str(SAMPLE).unwrap();
        file.cbd_fares.push(FareEntry {
            stop: "All Sops".to_string(),
            price: 200.0,
        });
        let err = Tariff::from_config(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate fare entry"));
    }

    #[test]
    fn rejects_empty_stop_name_in_fares() {
        let mut file: PricingFile = serde_yaml::from_str(SAMPLE).unwrap();
        file.route_fares[1].stops.push(FareEntry {
            stop: "   ".to_string(),
            price: 90.0,
        });
        let err = Tariff::from_config(&file).unwrap_err();
        assert!(err.to_string().contains("empty stop name"));
    }

    #[test]
    fn load_pricing_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("pricing.yaml");
        assert!(
            path.exists(),
            "pricing.yaml missing at {path:?} — required for this test"
        );
        let result = load_pricing(&path);
        assert!(result.is_ok(), "failed to load pricing.yaml: {result:?}");
        let file = result.unwrap();
        assert!(!file.routes.is_empty());
        assert!(!file.cbd_fares.is_empty());
    }
}
