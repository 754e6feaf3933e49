use reqwest::Client;
use std::io::{self, Write};
use tabmine::{cli::Cli, logging, pipeline};
use tracing::info;

#[tokio::main]
async fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init_logging();

    // ─── 2) parse & validate args ────────────────────────────────────
    let config = match Cli::config_from(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => {
            let _ = e.report(&mut io::stdout(), &mut io::stderr());
            let _ = io::stdout().flush();
            std::process::exit(e.exit_code());
        }
    };

    // ─── 3) fetch, extract, write ────────────────────────────────────
    let client = Client::new();
    match pipeline::run(&client, &config).await {
        Ok(summary) => info!(tables = summary.tables, "done"),
        Err(e) => {
            eprintln!("tabmine error: {:#}", e);
            std::process::exit(1);
        }
    }
}
