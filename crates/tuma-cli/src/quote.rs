use clap::Args;

use tuma_core::{ensure_distinct_stops, PriceBreakdown, Quoter, StopSelection, Tariff};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Pickup route name (exact match)
    #[arg(long)]
    pub from_route: String,

    /// Pickup stop name
    #[arg(long)]
    pub from_stop: String,

    /// Drop-off route name (exact match)
    #[arg(long)]
    pub to_route: String,

    /// Drop-off stop name
    #[arg(long)]
    pub to_stop: String,

    /// Emit the breakdown as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Price a delivery between two stops and print the breakdown.
///
/// # Errors
///
/// Returns an error for unknown routes, identical stops, or fares missing
/// from the pricing data.
pub(crate) fn run_quote(tariff: &Tariff, args: &QuoteArgs) -> anyhow::Result<()> {
    let pickup = selection(tariff, &args.from_route, &args.from_stop)?;
    let dropoff = selection(tariff, &args.to_route, &args.to_stop)?;

    ensure_distinct_stops(&pickup, &dropoff)?;
    let breakdown = Quoter::new(tariff).quote(&pickup, &dropoff)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    print_breakdown(&breakdown);
    Ok(())
}

fn selection(tariff: &Tariff, route_name: &str, stop: &str) -> anyhow::Result<StopSelection> {
    let route = tariff.catalog().route_by_name(route_name).ok_or_else(|| {
        anyhow::anyhow!("unknown route '{route_name}'; run `tuma routes` to list the catalog")
    })?;
    Ok(StopSelection::new(
        route.id.clone(),
        route.name.clone(),
        stop,
    ))
}

fn print_breakdown(b: &PriceBreakdown) {
    let relation = if b.is_same_route {
        "same route"
    } else {
        "cross route"
    };
    println!("Route match:   {relation}");
    println!("Pickup cost:   {}", fmt_amount(&b.currency, b.pickup_cost));
    println!("Drop-off cost: {}", fmt_amount(&b.currency, b.dropoff_cost));
    println!(
        "Base amount:   {}   [{}]",
        fmt_amount(&b.currency, b.breakdown.base_calculation),
        b.breakdown.formula
    );
    println!("Fixed fee:     {}", fmt_amount(&b.currency, b.fixed_fee));
    println!("Total:         {} {}", b.currency, b.total);
}

/// Whole amounts print without a decimal tail; fractional ones keep two
/// places.
fn fmt_amount(currency: &str, amount: f64) -> String {
    if (amount - amount.trunc()).abs() < f64::EPSILON {
        format!("{currency} {amount:.0}")
    } else {
        format!("{currency} {amount:.2}")
    }
}
