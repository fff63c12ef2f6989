use clap::Args;
use orderwatch_store::IngestResult;

use crate::config::AppContext;
use crate::output;
use crate::refresh::Session;

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: StatusArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = Session::open(ctx).await?;
    let results = session.refresh().await?;

    if args.json {
        let orders: Vec<serde_json::Value> = results.iter().map(result_json).collect();
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No orders found");
        return Ok(());
    }
    for result in &results {
        print_summary(result);
        println!();
    }
    Ok(())
}

fn result_json(result: &IngestResult) -> serde_json::Value {
    let snapshot = &result.snapshot;
    serde_json::json!({
        "referenceNumber": snapshot.reference_number(),
        "model": snapshot.order.model_name(),
        "status": snapshot.status(),
        "vin": snapshot.vin(),
        "deliveryWindow": snapshot.delivery_window(),
        "deliveryAppointment": snapshot.delivery_appointment(),
        "etaToDeliveryCenter": snapshot.eta_to_delivery_center(),
        "changes": result.diffs(),
        "storageError": result.outcome.as_ref().err().map(|e| e.to_string()),
    })
}

pub fn print_summary(result: &IngestResult) {
    let snapshot = &result.snapshot;
    println!(
        "{}",
        output::header(&format!(
            "{} {}",
            snapshot.order.model_name(),
            snapshot.reference_number()
        ))
    );
    println!("{}", output::kv("Status", &snapshot.status()));
    println!("{}", output::kv("VIN", &snapshot.vin()));
    println!("{}", output::kv("Delivery Window", &snapshot.delivery_window()));
    println!(
        "{}",
        output::kv("Delivery Appointment", &snapshot.delivery_appointment())
    );
    println!(
        "{}",
        output::kv("ETA to Delivery Center", &snapshot.eta_to_delivery_center())
    );

    match &result.outcome {
        Ok(diffs) if diffs.is_empty() => println!("No changes since last check"),
        Ok(diffs) => {
            println!("Changes since last check:");
            for diff in diffs {
                println!("{}", output::change_line(diff));
            }
        }
        Err(e) => println!("History not updated: {e}"),
    }
}
