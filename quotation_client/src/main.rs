//! Quotation Client - asks the local quotation server for the current bid, appends it
//! to a file and prints it to stdout.
//!
//! Usage example (CLI):
//! ```bash
//! quotation_client --url http://localhost:8080/cotacao --timeout-ms 300 --output cotacao.txt
//! ```
//!
//! Any failure, including a timeout, ends the process with a non-zero exit code.
#![warn(missing_docs)]
use clap::Parser;
use log::{error, info, warn};
use quotation_client::args::Args;
use quotation_client::output::append_quotation;
use quotation_client::requester::QuotationRequester;
use quotation_common::{QuotationError, Result};

#[tokio::main]
async fn main() -> Result<(), QuotationError> {
    init_logger();
    let args = Args::parse();
    let requester = QuotationRequester::new(&args.url, args.timeout())?;

    let body = match requester.request().await {
        Ok(body) => body,
        Err(e) => {
            if e.is_deadline_exceeded() {
                warn!("Timeout exceeded for call to quotation API at {}", requester.url());
            }
            error!("Quotation request failed: {}", e);
            return Err(e);
        }
    };

    let output = args.output_path();
    append_quotation(&output, &body)?;
    info!("Quotation appended to {}", output.display());
    println!("{}", body);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
