//! Triathlon Fuel (trifuel)
//!
//! An MCP server for endurance athlete nutrition planning.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use trifuel::build_info;
use trifuel::config::{get_output_dir, DEFAULT_LOG_DIRECTIVE};
use trifuel::mcp::TrifuelService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let output_dir = get_output_dir();
    build_info::print_startup_banner(&output_dir);
    std::fs::create_dir_all(&output_dir)?;
    eprintln!("Starting MCP server on stdio...");

    let service = TrifuelService::new(output_dir);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
