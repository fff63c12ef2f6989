pub mod checklist;
pub mod config;
pub mod history;
pub mod login;
pub mod show;
pub mod status;
pub mod watch;

use clap::Subcommand;

use crate::config::AppContext;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with the browser PKCE flow
    Login(login::LoginArgs),
    /// Remove stored credentials
    Logout,
    /// Refresh all orders once and show what changed
    Status(status::StatusArgs),
    /// Refresh periodically until interrupted
    Watch(watch::WatchArgs),
    /// Show everything known about one order
    Show(show::ShowArgs),
    /// Show the stored snapshots of one order
    History(history::HistoryArgs),
    /// Show or update the delivery checklist of one order
    Checklist(checklist::ChecklistArgs),
    /// Manage config.toml
    Config(config::ConfigArgs),
}

impl Commands {
    pub async fn run(self, ctx: &AppContext) -> anyhow::Result<()> {
        match self {
            Commands::Login(args) => login::run(args, ctx).await,
            Commands::Logout => login::logout(ctx),
            Commands::Status(args) => status::run(args, ctx).await,
            Commands::Watch(args) => watch::run(args, ctx).await,
            Commands::Show(args) => show::run(args, ctx).await,
            Commands::History(args) => history::run(args, ctx),
            Commands::Checklist(args) => checklist::run(args, ctx),
            Commands::Config(args) => config::run(args, ctx),
        }
    }
}
