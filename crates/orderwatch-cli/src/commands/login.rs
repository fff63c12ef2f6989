use std::io::{self, Write};

use clap::Args;
use orderwatch_api::{extract_code, AuthClient, AuthSession};

use crate::config::AppContext;

#[derive(Args)]
pub struct LoginArgs {
    /// Do not open browser automatically
    #[arg(long)]
    no_browser: bool,
}

fn prompt_input(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub async fn run(args: LoginArgs, ctx: &AppContext) -> anyhow::Result<()> {
    if ctx.is_demo() {
        anyhow::bail!("demo mode does not use an account");
    }

    let session = AuthSession::new();
    let authorize_url = session.authorize_url();
    if !args.no_browser {
        if let Err(e) = webbrowser::open(&authorize_url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    println!("Open this URL to authenticate:\n{authorize_url}\n");
    println!("After signing in you land on a \"Page Not Found\" page.");
    println!("Copy the full URL from the address bar and paste it below.\n");
    let input = prompt_input("Callback URL or code: ")?;
    let code = extract_code(&input, &session.state)?;

    let tokens = AuthClient::new()
        .exchange_code(&code, &session.code_verifier)
        .await?;
    ctx.home_store()?.tokens().save(&tokens)?;

    println!("Logged in; credentials saved under {}", ctx.home().display());
    Ok(())
}

pub fn logout(ctx: &AppContext) -> anyhow::Result<()> {
    if ctx.home_store()?.tokens().clear()? {
        println!("Logged out");
    } else {
        println!("No stored credentials");
    }
    Ok(())
}
