//! clabcli - Classroom Lab Network Client Configurator

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use clabcli::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Eda { name, dry_run } => {
            clabcli::commands::eda::run(name.as_deref(), dry_run).await
        }
        Commands::Check { segment } => clabcli::commands::check::run(&segment).await,
        Commands::User => clabcli::commands::user::run().await,
        Commands::Uninstall { name } => clabcli::commands::uninstall::run(&name).await,
        Commands::Version => {
            println!("clabcli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
