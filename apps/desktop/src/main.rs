use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, Action, AuthState, ClientConfig, OrderDesk, OrderServiceClient};
use shared::domain::{InvalidNumberPolicy, PACKAGE_SLOTS};

#[derive(Parser, Debug)]
#[command(about = "Log in, submit one package order and print the result")]
struct Args {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    amount: String,
    /// Comma-separated package sizes, one per slot.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    sizes: Vec<String>,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    auth_token: Option<String>,
    /// Send unparseable numbers as null instead of refusing to submit.
    #[arg(long)]
    send_invalid_as_null: bool,
}

fn resolve_config(args: &Args) -> ClientConfig {
    let mut config = load_settings();
    if let Some(server_url) = &args.server_url {
        config.server_url = server_url.clone();
    }
    if let Some(auth_token) = &args.auth_token {
        config.auth_token = auth_token.clone();
    }
    if args.send_invalid_as_null {
        config.invalid_numbers = InvalidNumberPolicy::SendNull;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    if args.sizes.len() > PACKAGE_SLOTS {
        bail!(
            "expected at most {PACKAGE_SLOTS} package sizes, got {}",
            args.sizes.len()
        );
    }

    let config = resolve_config(&args);
    let client = OrderServiceClient::from_config(&config)
        .with_context(|| format!("invalid server url {}", config.server_url))?;
    let mut desk = OrderDesk::new(&config);

    desk.dispatch(Action::UpdateUsername(args.username))?;
    desk.dispatch(Action::UpdatePassword(args.password))?;
    if desk.login(&client).await != AuthState::Authenticated {
        let reason = desk.session().login_error().unwrap_or("login rejected");
        bail!("{reason}");
    }

    desk.dispatch(Action::UpdateAmount(args.amount))?;
    for (index, value) in args.sizes.into_iter().enumerate() {
        desk.dispatch(Action::UpdatePackageSize { index, value })?;
    }

    let outcome = desk.submit(&client).await;
    print!("{}", desk.view().render_text());
    outcome.context("order submission failed")?;

    Ok(())
}
