use chrono::Utc;

use tuma_core::{FareError, Tariff};

/// Audit fare coverage: every catalog stop must price from the hub dataset
/// and from its own route's fare table.
///
/// Prints a markdown report to stdout and fails when coverage gaps exist,
/// so the command can gate pricing-data changes.
///
/// # Errors
///
/// Returns an error when any stop cannot be priced.
pub(crate) fn run_check(tariff: &Tariff) -> anyhow::Result<()> {
    let mut misses = Vec::new();

    for route in tariff.catalog().routes() {
        let mut route_has_table = true;
        for stop in &route.stops {
            if tariff.cbd_fare(&stop.name).is_err() {
                misses.push(format!(
                    "no hub fare for '{}' (route '{}')",
                    stop.name, route.name
                ));
            }
            if route_has_table {
                match tariff.route_fare(&route.name, &stop.name) {
                    Ok(_) => {}
                    Err(FareError::RouteNotFound(_)) => {
                        misses.push(format!("route '{}' has no fare table", route.name));
                        route_has_table = false;
                    }
                    Err(e) => misses.push(format!("route '{}': {e}", route.name)),
                }
            }
        }
    }

    let routes = tariff.catalog().routes();
    let stop_count: usize = routes.iter().map(|r| r.stops.len()).sum();
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    println!("# Fare Coverage Report");
    println!();
    println!("**Generated**: {now}");
    println!("**Audited**: {} routes, {stop_count} stops", routes.len());
    println!();

    if misses.is_empty() {
        println!("Full coverage: every stop prices from both datasets.");
        return Ok(());
    }

    for miss in &misses {
        println!("- {miss}");
    }
    Err(anyhow::anyhow!("{} coverage gaps found", misses.len()))
}
