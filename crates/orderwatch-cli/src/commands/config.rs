use clap::{Args, Subcommand};
use orderwatch_store::config::write_default_config;

use crate::config::AppContext;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config.toml with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

pub fn run(args: ConfigArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let layout = ctx.home_layout();
    match args.command {
        ConfigCommand::Init { force } => {
            let path = layout.config_file();
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ctx.home_store()?;
            write_default_config(&layout)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommand::Show => {
            let config = ctx.app_config()?;
            println!("# {}", layout.config_file().display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
