//! Body Composition Estimator (bodycomp)
//!
//! An MCP server for estimating body fat from skinfold measurements.

use chrono::NaiveDate;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bodycomp::build_info;
use bodycomp::composition::{parse_date, FormatError};
use bodycomp::mcp::BodycompService;

/// Get the pinned reference date from the environment, if any
fn get_reference_date() -> Result<Option<NaiveDate>, FormatError> {
    match std::env::var("BODYCOMP_TODAY") {
        Ok(value) if !value.trim().is_empty() => parse_date(&value).map(Some),
        _ => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bodycomp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let reference_date = get_reference_date()?;
    match reference_date {
        Some(date) => tracing::info!("Ages resolved against pinned date {}", date),
        None => tracing::info!("Ages resolved against the local clock"),
    }

    // Create the bodycomp service
    let service = BodycompService::new(reference_date);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
