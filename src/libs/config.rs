//! Configuration management for the planr application.
//!
//! Settings live in a JSON file (`config.json`) in the platform-specific
//! application data directory and are loaded with sensible defaults when the
//! file is missing. Two optional modules exist:
//!
//! - **Schedule**: the default dependency policy applied when a task is
//!   created or edited. Historically the same user action was rejected on
//!   one surface and silently corrected on another; the policy is now an
//!   explicit choice, stored here and overridable per invocation with
//!   `--policy`.
//! - **Display**: whether external tasks and milestones are hidden from
//!   schedule views by default.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use planr::libs::config::Config;
//!
//! let config = Config::read()?;
//! let policy = config.default_policy();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::schedule::SchedulePolicy;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Scheduling behavior configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ScheduleConfig {
    /// Dependency policy applied when no `--policy` flag is given.
    pub policy: SchedulePolicy,
}

/// Schedule view display configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DisplayConfig {
    /// Hide external tasks and milestones from schedule views.
    pub hide_external: bool,
}

/// Main configuration container.
///
/// Each module is optional so that a missing or partial configuration file
/// never breaks the application; unconfigured modules are omitted from the
/// JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults if it does not
    /// exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The dependency policy to use when the caller does not override it.
    pub fn default_policy(&self) -> SchedulePolicy {
        self.schedule.as_ref().map(|s| s.policy).unwrap_or_default()
    }

    /// Whether schedule views hide external tasks by default.
    pub fn hide_external(&self) -> bool {
        self.display.as_ref().map(|d| d.hide_external).unwrap_or(false)
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Presents a multi-select of available modules and prompts for each
    /// selected one, pre-filling current values as defaults. The updated
    /// configuration is returned for saving.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = ["Schedule", "Display"];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for &selection in &selected {
            match modules[selection] {
                "Schedule" => {
                    let default = config.schedule.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleSchedule);
                    let choices = [SchedulePolicy::AutoAdvance, SchedulePolicy::Reject];
                    let labels = ["auto-advance", "reject"];
                    let current = choices.iter().position(|p| *p == default.policy).unwrap_or(0);
                    let picked = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultPolicy.to_string())
                        .items(&labels)
                        .default(current)
                        .interact()?;
                    config.schedule = Some(ScheduleConfig { policy: choices[picked] });
                }
                "Display" => {
                    let default = config.display.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDisplay);
                    config.display = Some(DisplayConfig {
                        hide_external: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptHideExternal.to_string())
                            .default(default.hide_external)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
