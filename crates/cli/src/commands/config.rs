//! Session config inspection

use anyhow::Result;
use roadfeel_config::SessionConfig;

use crate::commands::ConfigCommands;
use crate::error::CliError;
use crate::output;

pub fn execute(cmd: &ConfigCommands, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show { path } => {
            let config = match path {
                Some(path) => load(path)?,
                None => SessionConfig::default(),
            };
            output::print_config(&config, json)?;
        }
        ConfigCommands::Check { path } => {
            let config = load(path)?;
            output::print_config_ok(&path.display().to_string(), &config, json);
        }
    }
    Ok(())
}

fn load(path: &std::path::Path) -> Result<SessionConfig, CliError> {
    SessionConfig::load_from_path(path).map_err(|e| CliError::InvalidConfiguration(format!("{e:#}")))
}
