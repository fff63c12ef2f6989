use std::future::Future;
use std::time::Duration;

use clap::Args;

use crate::config::AppContext;
use crate::output;
use crate::refresh::Session;

#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between refreshes [default: refresh_interval_secs from config.toml]
    #[arg(long)]
    interval: Option<u64>,
}

pub async fn run(args: WatchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let interval = match args.interval {
        Some(secs) => secs,
        None => ctx.app_config()?.refresh_interval_secs,
    };
    if interval == 0 {
        anyhow::bail!("refresh interval must be at least one second");
    }

    let mut session = Session::open(ctx).await?;
    println!("Refreshing every {interval}s, press Ctrl-C to stop");
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    watch_until(&mut session, Duration::from_secs(interval), shutdown).await?;
    println!("Stopped");
    Ok(())
}

/// Refresh on every tick until `shutdown` resolves, including while a
/// refresh is in flight. Returns the number of completed refreshes.
async fn watch_until(
    session: &mut Session,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<usize> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    let mut first = true;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        let refreshed = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            refreshed = session.refresh() => refreshed,
        };

        let now = output::timestamp(&chrono::Utc::now());
        match refreshed {
            Ok(results) if first => {
                for result in &results {
                    super::status::print_summary(result);
                    println!();
                }
                first = false;
            }
            Ok(results) => {
                let changed: Vec<_> = results.iter().filter(|r| !r.diffs().is_empty()).collect();
                if changed.is_empty() {
                    println!("[{now}] no changes");
                }
                for result in changed {
                    println!("[{now}] {} changed:", result.snapshot.reference_number());
                    for diff in result.diffs() {
                        println!("{}", output::change_line(diff));
                    }
                }
            }
            Err(e) => tracing::warn!(error = %format!("{e:#}"), "refresh failed"),
        }
        cycles += 1;
    }
    Ok(cycles)
}
