use clap::Subcommand;
use masterbot_core::{ReasoningProvider, UserConfig};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "profile.name", "engine.max_recommendations")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Check the config and report every problem
    Validate,
    /// Print the config file location
    Path,
    /// Add or overwrite an interest weight
    AddInterest {
        /// Event tag, e.g. "music"
        tag: String,
        /// Weight; negative weights count against events with this tag
        #[arg(allow_negative_numbers = true)]
        weight: i64,
    },
    /// Remove an interest
    RemoveInterest {
        tag: String,
    },
    /// Choose the reasoning backend and store its API key
    SetProvider {
        /// "openai" or "claude"
        provider: ReasoningProvider,
        api_key: String,
    },
}

pub fn run(config_path: &Path, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = UserConfig::load_from(config_path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = UserConfig::load_from(config_path)?;
            config.set(&key, &value)?;
            config.save_to(config_path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = UserConfig::load_from(config_path)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = UserConfig::default();
            config.save_to(config_path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Validate => {
            let config = UserConfig::load_from(config_path)?;
            let problems = config.validation_errors();
            if problems.is_empty() {
                println!("config is valid");
            } else {
                for problem in &problems {
                    println!("- {problem}");
                }
                return Err(format!("{} problem(s) found", problems.len()).into());
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::AddInterest { tag, weight } => {
            let mut config = UserConfig::load_from(config_path)?;
            config.add_interest(tag, weight);
            config.save_to(config_path)?;
            println!("ok");
        }
        ConfigAction::RemoveInterest { tag } => {
            let mut config = UserConfig::load_from(config_path)?;
            if !config.remove_interest(&tag) {
                return Err(format!("no interest named '{tag}'").into());
            }
            config.save_to(config_path)?;
            println!("ok");
        }
        ConfigAction::SetProvider { provider, api_key } => {
            let mut config = UserConfig::load_from(config_path)?;
            config.set_ai_provider(provider, api_key);
            config.save_to(config_path)?;
            println!("using {provider}");
        }
    }
    Ok(())
}
