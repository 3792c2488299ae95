//! AERA Flight Search CLI
//!
//! Runs a flight search against the network reference data and prints
//! the simulated schedule.
//!
//! Usage:
//!   aera-search --from BUE --to MAD --depart 2026-09-11 \
//!               --cabin business --round-trip --return-date 2026-09-18

use anyhow::{anyhow, Result};
use aera_engine::{
    generate_search_results, validate_search_input, Cabin, FlightOption, PassengerCounts,
    SearchRequest, TripType,
};
use aera_reference::ReferenceData;
use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "aera-search", about = "Search simulated AERA network flights")]
struct Args {
    /// Origin metro (code or "City (CODE)" label)
    #[arg(short, long)]
    from: String,

    /// Destination metro (code or "City (CODE)" label)
    #[arg(short, long)]
    to: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(short, long)]
    depart: NaiveDate,

    /// Search a round trip instead of one-way
    #[arg(long)]
    round_trip: bool,

    /// Return date (YYYY-MM-DD), required with --round-trip
    #[arg(long)]
    return_date: Option<NaiveDate>,

    /// Cabin: economy, premium-economy, business, first
    #[arg(long, default_value = "economy")]
    cabin: String,

    /// Adult travelers
    #[arg(long, default_value_t = 1)]
    adults: u32,

    /// Teen travelers (12-17)
    #[arg(long, default_value_t = 0)]
    teens: u32,

    /// Child travelers (2-11)
    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Infant travelers (under 2)
    #[arg(long, default_value_t = 0)]
    infants: u32,

    /// Preferred aircraft slug for the longest segment
    #[arg(long)]
    aircraft: Option<String>,

    /// Emit results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_cabin(value: &str) -> Result<Cabin> {
    match value.to_ascii_lowercase().as_str() {
        "economy" => Ok(Cabin::Economy),
        "premium-economy" | "premium" => Ok(Cabin::PremiumEconomy),
        "business" => Ok(Cabin::Business),
        "first" => Ok(Cabin::First),
        other => Err(anyhow!("unknown cabin '{other}'")),
    }
}

fn print_option(option: &FlightOption) {
    info!(
        "  {} | {} {} ({}) -> {} ({}) {} | {} | {} | {} total",
        option.flight_number,
        option.departure_date,
        option.departure_time,
        option.departure_time_zone,
        option.arrival_time,
        option.arrival_time_zone,
        option.day_shift,
        option.duration,
        option.aircraft_name,
        option.pricing.subtotal
    );
    info!("      {}", option.itinerary_line);
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reference = ReferenceData::standard();

    let from = reference
        .metros
        .resolve(&args.from)
        .ok_or_else(|| anyhow!("unknown origin metro '{}'", args.from))?;
    let to = reference
        .metros
        .resolve(&args.to)
        .ok_or_else(|| anyhow!("unknown destination metro '{}'", args.to))?;

    let request = SearchRequest {
        from_code: from.code.clone(),
        to_code: to.code.clone(),
        departure_date: args.depart,
        return_date: args.return_date,
        trip_type: if args.round_trip {
            TripType::RoundTrip
        } else {
            TripType::OneWay
        },
        cabin: parse_cabin(&args.cabin)?,
        passengers: PassengerCounts {
            adults: args.adults,
            teens: args.teens,
            children: args.children,
            infants: args.infants,
        },
        preferred_aircraft: args.aircraft.clone(),
    };

    validate_search_input(&reference.metros, &request).map_err(|e| anyhow!(e.to_string()))?;

    let results = generate_search_results(&reference, &request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    info!("{}", "=".repeat(60));
    info!(
        "AERA Flight Search: {} -> {} ({})",
        from.search_label(),
        to.search_label(),
        request.trip_type.label()
    );
    info!("{}", "=".repeat(60));

    info!("Outbound options ({}):", results.outbound_options.len());
    for option in &results.outbound_options {
        print_option(option);
    }

    if !results.return_options.is_empty() {
        info!("Return options ({}):", results.return_options.len());
        for option in &results.return_options {
            print_option(option);
        }
    }

    Ok(())
}
