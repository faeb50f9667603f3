//! Quotation server binary.
//!
//! Parses arguments, opens the datastore, binds the listener and serves until Ctrl+C.
use clap::Parser;
use log::info;
use quotation_common::QuotationError;
use quotation_server::app::{self, AppState};
use quotation_server::args::Args;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuotationError> {
    init_logger();
    let config = Args::parse().into_config()?;
    let state = AppState::new(&config)?;
    info!("Binding {}", config.listen_addr());
    let listener = TcpListener::bind(config.bind_addr).await?;
    app::serve(listener, state).await
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
