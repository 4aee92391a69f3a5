//! Application configuration initialization command.
//!
//! Runs the interactive setup wizard: pick the modules to configure
//! (scheduling policy, display defaults) and persist the result.

use crate::{
    libs::{config::Config, data_storage::DataStorage, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let config_path = DataStorage::new().get_path(crate::libs::config::CONFIG_FILE_NAME)?;
        if config_path.exists() {
            fs::remove_file(config_path)?;
        }
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
