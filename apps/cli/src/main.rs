//! # Bistro CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, to stderr)
//! 2. Parse arguments
//! 3. Load configuration and build the store (lib.rs)
//! 4. Rehydrate the session and load the menu
//! 5. Run the subcommand, print notices

use anyhow::Result;
use bistro_cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    bistro_cli::init_tracing();

    let cli = Cli::parse();
    bistro_cli::run(cli).await
}
