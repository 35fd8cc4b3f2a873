use tuma_core::Tariff;

/// Print the route catalog as a table.
pub(crate) fn run_routes(tariff: &Tariff) -> anyhow::Result<()> {
    let header = format!("{:<10}{:<15}{:<7}STOPS", "ID", "ROUTE", "COUNT");
    println!("{header}");
    for route in tariff.catalog().routes() {
        let stops = route
            .stops
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<10}{:<15}{:<7}{}",
            route.id,
            route.name,
            route.stops.len(),
            stops
        );
    }
    Ok(())
}
