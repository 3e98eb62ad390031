use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::error::Result;

/// Execute config command
pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("✅ Configuration updated: {} = {}", key, value);
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match key {
                Some(key) => match config.get(&key) {
                    Some(value) => {
                        println!("{}: {}", key, value);
                    }
                    None => {
                        println!("Configuration key '{}' not found", key);
                    }
                },
                None => {
                    for key in Config::KEYS {
                        if let Some(value) = config.get(key) {
                            println!("{}: {}", key, value);
                        }
                    }
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
        ConfigCommand::Init => {
            Config::initialize()?;
            println!("✅ Configuration initialized");
            println!();
            println!("Useful settings:");
            println!("  docket config set search.delay_min_ms 3000");
            println!("  docket config set search.timeout_secs 30");
            println!("  docket config set database.path /path/to/cases.db");
            Ok(())
        }
    }
}
