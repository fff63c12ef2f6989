use clap::Args;
use orderwatch_store::{count_completed, find_item, DELIVERY_CHECKLIST};

use crate::config::AppContext;
use crate::output;

#[derive(Args)]
pub struct ChecklistArgs {
    /// Order reference number
    reference: String,
    /// Flip the item with this id
    #[arg(long, value_name = "ID")]
    toggle: Option<String>,
}

pub fn run(args: ChecklistArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let checklists = ctx.data_store()?.checklists();

    if let Some(id) = &args.toggle {
        let item = find_item(id).ok_or_else(|| anyhow::anyhow!("unknown checklist item '{id}'"))?;
        let checked = checklists.toggle_item(&args.reference, item.id)?;
        println!("{} {}", output::checkbox(checked), item.text);
        println!();
    }

    let state = checklists.load_state(&args.reference)?;
    let (done, total) = count_completed(&state.checked);
    println!(
        "{}",
        output::header(&format!("Checklist {} ({done}/{total})", args.reference))
    );
    for section in DELIVERY_CHECKLIST {
        println!("{}:", section.title);
        for item in section.items {
            println!(
                "  {} {:<14} {}",
                output::checkbox(state.is_checked(item.id)),
                item.id,
                item.text
            );
        }
    }
    Ok(())
}
