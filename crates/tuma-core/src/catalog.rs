//! The route/stop catalog: predefined transit routes with their ordered
//! stop lists, built once from configuration and immutable afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalize::canonical_stop_name;
use crate::ConfigError;

/// A named point on a route.
///
/// `fare` is the cost from the route's origin to this stop, attached when
/// the per-route fare dataset covers the stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub fare: Option<f64>,
}

/// A named transit route with an ordered list of stops.
///
/// `id` is positional (`route_<n>`), assigned at load time from the ordered
/// route definitions; it is stable only as long as the source ordering is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub stops: Vec<Stop>,
}

/// One route as written in the pricing file: a name and its stop names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDef {
    pub name: String,
    pub stops: Vec<String>,
}

/// Deterministic stop identity derived from `(route_name, stop_name)`:
/// both lowercased, whitespace runs replaced with underscores, joined by a
/// double underscore. The same route and stop always yield the same id.
#[must_use]
pub fn stop_id(route_name: &str, stop_name: &str) -> String {
    format!("{}__{}", slug(route_name), slug(stop_name))
}

fn slug(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// The full route catalog, validated at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    routes: Vec<Route>,
}

impl Catalog {
    /// Build the catalog from ordered route definitions.
    ///
    /// `origin_fare` supplies the fare from a route's origin to a stop when
    /// the per-route dataset covers it (keyed by route name and raw stop
    /// name).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on empty route lists, empty names,
    /// routes without stops, duplicate route names, or stop-id collisions
    /// within a route.
    pub fn build<F>(defs: &[RouteDef], origin_fare: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str, &str) -> Option<f64>,
    {
        if defs.is_empty() {
            return Err(ConfigError::Validation(
                "route catalog must contain at least one route".to_string(),
            ));
        }

        let mut seen_routes = HashSet::new();
        let mut routes = Vec::with_capacity(defs.len());

        for (index, def) in defs.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "route name must be non-empty".to_string(),
                ));
            }
            if def.stops.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "route '{}' has no stops",
                    def.name
                )));
            }
            if !seen_routes.insert(def.name.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate route name: '{}'",
                    def.name
                )));
            }

            let mut seen_ids = HashSet::new();
            let mut stops = Vec::with_capacity(def.stops.len());
            for stop_name in &def.stops {
                if stop_name.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "route '{}' has an empty stop name",
                        def.name
                    )));
                }
                let id = stop_id(&def.name, stop_name);
                if !seen_ids.insert(id.clone()) {
                    return Err(ConfigError::Validation(format!(
                        "duplicate stop id '{id}' in route '{}'",
                        def.name
                    )));
                }
                stops.push(Stop {
                    id,
                    name: stop_name.clone(),
                    fare: origin_fare(&def.name, stop_name),
                });
            }

            routes.push(Route {
                id: format!("route_{}", index + 1),
                name: def.name.clone(),
                stops,
            });
        }

        Ok(Self { routes })
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Exact match on the positional route id.
    #[must_use]
    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Exact match on the route's display name. Route names are never
    /// normalized; only stop names are.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Find a stop on the given route by canonicalized name comparison.
    #[must_use]
    pub fn find_stop(&self, route_id: &str, stop_name: &str) -> Option<&Stop> {
        let wanted = canonical_stop_name(stop_name);
        self.route_by_id(route_id)?
            .stops
            .iter()
            .find(|s| canonical_stop_name(&s.name) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<RouteDef> {
        vec![
            RouteDef {
                name: "Thika Road".to_string(),
                stops: vec!["Ngara".to_string(), "Allsops".to_string()],
            },
            RouteDef {
                name: "Ngong Road".to_string(),
                stops: vec!["Kilimani".to_string()],
            },
        ]
    }

    #[test]
    fn stop_id_is_deterministic_and_lowercased() {
        assert_eq!(stop_id("Thika Road", "Githurai 45"), "thika_road__githurai_45");
        assert_eq!(
            stop_id("Thika Road", "Githurai 45"),
            stop_id("Thika Road", "Githurai 45")
        );
    }

    #[test]
    fn stop_id_collapses_whitespace_runs() {
        assert_eq!(stop_id("Thika  Road", "Kahawa   Sukari"), "thika_road__kahawa_sukari");
    }

    #[test]
    fn build_assigns_positional_route_ids() {
        let catalog = Catalog::build(&defs(), |_, _| None).unwrap();
        assert_eq!(catalog.routes()[0].id, "route_1");
        assert_eq!(catalog.routes()[1].id, "route_2");
    }

    #[test]
    fn build_attaches_origin_fares() {
        let catalog = Catalog::build(&defs(), |route, stop| {
            (route == "Thika Road" && stop == "Allsops").then_some(160.0)
        })
        .unwrap();
        let thika = catalog.route_by_name("Thika Road").unwrap();
        assert_eq!(thika.stops[0].fare, None);
        assert_eq!(thika.stops[1].fare, Some(160.0));
    }

    #[test]
    fn build_rejects_empty_catalog() {
        let err = Catalog::build(&[], |_, _| None).unwrap_err();
        assert!(err.to_string().contains("at least one route"));
    }

    #[test]
    fn build_rejects_route_without_stops() {
        let defs = vec![RouteDef {
            name: "Thika Road".to_string(),
            stops: vec![],
        }];
        let err = Catalog::build(&defs, |_, _| None).unwrap_err();
        assert!(err.to_string().contains("has no stops"));
    }

    #[test]
    fn build_rejects_duplicate_route_names() {
        let mut d = defs();
        d[1].name = "Thika Road".to_string();
        let err = Catalog::build(&d, |_, _| None).unwrap_err();
        assert!(err.to_string().contains("duplicate route name"));
    }

    #[test]
    fn build_rejects_stop_id_collision_within_route() {
        // Distinct spellings that slug to the same id.
        let defs = vec![RouteDef {
            name: "Thika Road".to_string(),
            stops: vec!["Safari Park".to_string(), "safari  park".to_string()],
        }];
        let err = Catalog::build(&defs, |_, _| None).unwrap_err();
        assert!(err.to_string().contains("duplicate stop id"));
    }

    #[test]
    fn route_lookup_by_id_and_name() {
        let catalog = Catalog::build(&defs(), |_, _| None).unwrap();
        assert_eq!(catalog.route_by_id("route_2").unwrap().name, "Ngong Road");
        assert_eq!(catalog.route_by_name("Ngong Road").unwrap().id, "route_2");
        assert!(catalog.route_by_id("route_9").is_none());
        // Names are matched exactly, never case-folded.
        assert!(catalog.route_by_name("ngong road").is_none());
    }

    #[test]
    fn find_stop_compares_canonicalized_names() {
        let catalog = Catalog::build(&defs(), |_, _| None).unwrap();
        let stop = catalog.find_stop("route_1", "All Sops").unwrap();
        assert_eq!(stop.name, "Allsops");
        assert!(catalog.find_stop("route_1", "Kilimani").is_none());
    }
}
