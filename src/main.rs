mod api;
mod cli;
mod earnings;
mod metrics;
mod poll;
mod prelude;
mod quantity;
mod scrape;
mod tables;
mod watch;
mod zone;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Args::parse().command {
        Command::Watch(args) => watch::run(*args).await,
        Command::Fetch(args) => watch::run_once(*args).await,
        Command::Zones => {
            println!("{}", tables::build_zones_table());
            Ok(())
        }
    }
}
