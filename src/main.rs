use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use goldwatch::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for goldwatch::AppCommand {
    fn from(cmd: Commands) -> goldwatch::AppCommand {
        match cmd {
            Commands::Summary => goldwatch::AppCommand::Summary,
            Commands::Watch { duration } => goldwatch::AppCommand::Watch { duration },
            Commands::Factors { refresh } => goldwatch::AppCommand::Factors { refresh },
            Commands::Institutions { refresh } => goldwatch::AppCommand::Institutions { refresh },
            Commands::Advice { refresh } => goldwatch::AppCommand::Advice { refresh },
            Commands::Brief { refresh } => goldwatch::AppCommand::Brief { refresh },
            Commands::News { limit } => goldwatch::AppCommand::News { limit },
            Commands::Predictions => goldwatch::AppCommand::Predictions,
            Commands::Health => goldwatch::AppCommand::Health,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display a one-shot market summary
    Summary,
    /// Run the live dashboard with periodic refresh
    Watch {
        /// Exit after this many seconds instead of waiting for Ctrl-C
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Display AI bullish and bearish factors
    Factors {
        /// Ask the server to regenerate the analysis
        #[arg(long)]
        refresh: bool,
    },
    /// Display institutional forecasts
    Institutions {
        /// Ask the server to regenerate the analysis
        #[arg(long)]
        refresh: bool,
    },
    /// Display AI investment advice
    Advice {
        /// Ask the server to regenerate the analysis
        #[arg(long)]
        refresh: bool,
    },
    /// Display the consolidated market brief
    Brief {
        /// Ask the server to regenerate the analysis
        #[arg(long)]
        refresh: bool,
    },
    /// Display latest news
    News {
        /// Number of items to show
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Display price predictions
    Predictions,
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => goldwatch::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = goldwatch::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
api:
  base_url: "http://localhost:8000"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
