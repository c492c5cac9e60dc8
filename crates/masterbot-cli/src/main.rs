use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "masterbot", version, about = "MasterBot schedule assistant")]
struct Cli {
    /// Config file to use instead of ~/.config/masterbot/config.toml
    #[arg(long, global = true, env = "MASTERBOT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate events against your preferences and schedule
    Recommend(commands::recommend::RecommendArgs),
    /// List free time between committed events
    Slots(commands::slots::SlotsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config_path: &std::path::Path) {
    let level = config_path
        .exists()
        .then(|| masterbot_core::UserConfig::load_from(config_path).ok())
        .flatten()
        .map_or_else(|| "info".to_string(), |cfg| cfg.app.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => masterbot_core::UserConfig::default_path()?,
    };
    init_tracing(&config_path);

    match cli.command {
        Commands::Recommend(args) => commands::recommend::run(&config_path, args).await,
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Config { action } => commands::config::run(&config_path, action),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
