//! # Snapfeed CLI
//!
//! Command-line front end for the client library: sign up, sign in, publish
//! posts and browse the feed against a configured hosted backend.

use clap::Parser;

mod commands;
mod session;
mod telemetry;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&telemetry::TelemetryConfig::from_env());

    let cli = Cli::parse();
    commands::run(cli).await
}
