use anyhow::Result;
use clap::Parser;
use debug_marshal::cli::{Cli, Commands};
use debug_marshal::config::MarshalConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Initialize logging with verbosity-aware level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.to_log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MarshalConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode(args) => {
            debug_marshal::cli::commands::decode(args, &config)?;
        }
        Commands::Encode(args) => {
            debug_marshal::cli::commands::encode(args)?;
        }
        Commands::Notify(args) => {
            debug_marshal::cli::commands::notify(args)?;
        }
        Commands::Completions(args) => {
            debug_marshal::cli::commands::completions(args)?;
        }
    }

    Ok(())
}
