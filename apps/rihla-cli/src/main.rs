//! # Rihla CLI
//!
//! Client side of the auth flow: keeps the bearer token in a file or Redis
//! backed store with a mirrored cookie jar, loads the session from the
//! identity API and evaluates guards against it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::CheckArgs;
use context::ClientContext;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,rihla_core=info,rihla_infra=info")),
        )
        .compact()
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let ctx = ClientContext::from_cli(&cli).await?;

    let outcome = match cli.command {
        Commands::Login { token } => commands::login(&ctx, &token).await?,
        Commands::Logout => commands::logout(&ctx).await?,
        Commands::Whoami { json } => commands::whoami(&ctx, json).await?,
        Commands::Check {
            roles,
            permissions,
            all,
            path,
            mode,
        } => {
            let args = CheckArgs {
                roles,
                permissions,
                all,
                path,
                mode: mode.into(),
            };
            commands::check(&ctx, args).await?
        }
        Commands::Reconcile => commands::reconcile(&ctx).await?,
    };

    println!("{}", outcome.output);
    Ok(outcome.success)
}
