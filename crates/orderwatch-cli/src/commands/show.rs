use clap::Args;
use orderwatch_core::options::{categorize, decode_options};
use orderwatch_core::vin::decode_vin;
use orderwatch_core::{OrderSnapshot, NOT_AVAILABLE};

use crate::config::AppContext;
use crate::output::{self, kv};
use crate::refresh::Session;

#[derive(Args)]
pub struct ShowArgs {
    /// Order reference number
    reference: String,
    /// Also print unmodelled task payloads and the snapshot as JSON
    #[arg(long)]
    raw: bool,
    /// Use the last stored snapshot instead of fetching
    #[arg(long)]
    offline: bool,
}

fn stored_snapshot(ctx: &AppContext, reference: &str) -> anyhow::Result<OrderSnapshot> {
    ctx.data_store()?
        .history()
        .latest_snapshot(reference)?
        .map(|stored| stored.data)
        .ok_or_else(|| {
            anyhow::anyhow!("nothing stored for {reference}; run `orderwatch status` first")
        })
}

pub async fn run(args: ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = if args.offline {
        stored_snapshot(ctx, &args.reference)?
    } else {
        let mut session = Session::open(ctx).await?;
        match session.refresh_one(&args.reference).await {
            Ok(result) => result.snapshot,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "fetch failed, using stored snapshot");
                stored_snapshot(ctx, &args.reference)?
            }
        }
    };

    print_order(&snapshot);
    print_delivery(&snapshot);
    print_vehicle(&snapshot);
    print_options(&snapshot);
    print_tasks(&snapshot);

    if args.raw {
        println!();
        println!("{}", output::header("Raw tasks"));
        if snapshot.details.raw_tasks.is_empty() {
            println!("(none)");
        }
        for (name, task) in &snapshot.details.raw_tasks {
            println!("{name}:\n{}", task.to_pretty());
        }
        println!();
        println!("{}", output::header("Snapshot"));
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

fn print_order(snapshot: &OrderSnapshot) {
    let order = &snapshot.order;
    println!("{}", output::header("Order"));
    println!("{}", kv("Reference", snapshot.reference_number()));
    println!("{}", kv("Model", &order.model_name()));
    println!("{}", kv("Status", &snapshot.status()));
    println!("{}", kv("VIN", &snapshot.vin()));
    if order.is_b2b {
        println!(
            "{}",
            kv(
                "Company",
                order.owner_company_name.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        );
    }
    println!("{}", kv("Used", if order.is_used { "yes" } else { "no" }));
}

fn print_delivery(snapshot: &OrderSnapshot) {
    println!();
    println!("{}", output::header("Delivery"));
    println!("{}", kv("Window", &snapshot.delivery_window()));
    match snapshot.parsed_appointment() {
        Some(appointment) => {
            println!("{}", kv("Appointment Date", &appointment.date));
            if !appointment.time.is_empty() {
                println!("{}", kv("Appointment Time", &appointment.time));
            }
            if !appointment.address.is_empty() {
                println!("{}", kv("Appointment Location", &appointment.address));
            }
        }
        None => println!("{}", kv("Appointment", NOT_AVAILABLE)),
    }
    println!("{}", kv("Method", &snapshot.delivery_type()));
    println!("{}", kv("Center", &snapshot.delivery_center()));
    println!("{}", kv("ETA to Center", &snapshot.eta_to_delivery_center()));
    println!("{}", kv("Vehicle Location", &snapshot.vehicle_location()));
    println!("{}", kv("Odometer", &snapshot.odometer()));
    println!("{}", kv("License Plate", &snapshot.license_plate()));
    println!("{}", kv("Reservation Date", &snapshot.reservation_date()));
    println!("{}", kv("Order Booked", &snapshot.order_booked_date()));
}

fn print_vehicle(snapshot: &OrderSnapshot) {
    let Some(info) = snapshot.order.vin.as_deref().and_then(decode_vin) else {
        return;
    };
    println!();
    println!("{}", output::header("Vehicle"));
    println!("{}", kv("Manufacturer", info.manufacturer));
    println!("{}", kv("Region", info.region));
    println!("{}", kv("Model", info.model));
    println!("{}", kv("Body", info.body_type));
    println!("{}", kv("Fuel", info.fuel_type));
    println!("{}", kv("Powertrain", info.powertrain));
    println!("{}", kv("Model Year", info.model_year));
    println!("{}", kv("Plant", info.plant));
    println!("{}", kv("Serial", &info.serial_number));
}

fn print_options(snapshot: &OrderSnapshot) {
    let decoded = decode_options(snapshot.order.mkt_options.as_deref().unwrap_or_default());
    if decoded.is_empty() {
        return;
    }
    println!();
    println!("{}", output::header("Options"));
    for (category, options) in categorize(&decoded) {
        println!("  {}:", category.label());
        for option in options {
            println!(
                "    {:<8} {}",
                option.code,
                option.description.unwrap_or("Unknown option")
            );
        }
    }
}

fn print_tasks(snapshot: &OrderSnapshot) {
    let entries = snapshot.details.task_entries();
    if entries.is_empty() {
        return;
    }
    println!();
    println!("{}", output::header("Tasks"));
    for entry in entries {
        let state = entry.state();
        let card = state.card.unwrap_or_default();
        let title = if card.title.is_empty() {
            entry.name().to_string()
        } else {
            card.title
        };
        let mut line = format!("  {} {title}", output::checkbox(state.complete));
        if !card.subtitle.is_empty() {
            line.push_str(&format!(" - {}", card.subtitle));
        }
        if let (Some(label), Some(body)) = (card.message_title, card.message_body) {
            line.push_str(&format!(" ({label}: {body})"));
        }
        println!("{line}");
    }
}
