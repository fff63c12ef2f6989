use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;
mod refresh;

use commands::Commands;
use config::AppContext;

#[derive(Parser)]
#[command(
    name = "orderwatch",
    version,
    about = "Track vehicle orders and delivery progress from the terminal"
)]
struct Cli {
    /// Use built-in demo data instead of the live API
    #[arg(long, global = true)]
    demo: bool,
    /// Application home directory [default: ~/.config/orderwatch]
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match AppContext::resolve(cli.home, cli.demo) {
        Ok(ctx) => cli.command.run(&ctx).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}
