use clap::Args;

use orderwatch_store::OrderStore;

use crate::config::AppContext;
use crate::output;

#[derive(Args)]
pub struct HistoryArgs {
    /// Order reference number [default: list recorded orders]
    reference: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: HistoryArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.data_store()?;
    let Some(reference) = args.reference else {
        return list_recorded(&store, args.json);
    };
    let history = store.history().load_history(&reference)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No history recorded for {reference}");
        return Ok(());
    }

    println!(
        "{}",
        output::header(&format!(
            "{} ({} snapshots)",
            history.reference_number,
            history.len()
        ))
    );
    for (index, (snapshot, diffs)) in history.changes().into_iter().enumerate() {
        let when = output::timestamp(&snapshot.timestamp);
        if index == 0 {
            println!("{when}  first seen, status {}", snapshot.data.status());
            continue;
        }
        println!("{when}");
        for diff in &diffs {
            println!("{}", output::change_line(diff));
        }
    }
    Ok(())
}

fn list_recorded(store: &OrderStore, json: bool) -> anyhow::Result<()> {
    let history = store.history();
    let references = history.list_references()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&references)?);
        return Ok(());
    }
    if references.is_empty() {
        println!("No orders recorded yet");
        return Ok(());
    }

    println!("{}", output::header("Recorded orders"));
    for reference in &references {
        match history.latest_snapshot(reference)? {
            Some(latest) => println!(
                "{}",
                output::kv(
                    reference,
                    &format!(
                        "{} (last seen {})",
                        latest.data.status(),
                        output::timestamp(&latest.timestamp)
                    )
                )
            ),
            None => println!("{}", output::kv(reference, "no snapshots")),
        }
    }
    Ok(())
}
