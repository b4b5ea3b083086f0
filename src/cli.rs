//! Command-line argument parsing
//!
//! Supports:
//! - Replaying a scripted page scenario, online or offline
//! - Listing the keyboard shortcuts
//! - Writing settings (API key, model, tone) to the settings store

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{API_KEY, MODEL, TONE};

/// In-page writing assist
#[derive(Parser, Debug)]
#[command(name = "penmate", version, about = "In-page writing assist")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Replay a page scenario and print the resulting field contents
    Replay {
        /// Scenario YAML file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Answer requests locally instead of calling the API
        #[arg(long)]
        offline: bool,

        /// Settings file to read instead of the default location
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },

    /// List keyboard shortcuts
    Keys {
        /// Keymap YAML file to list instead of the built-in one
        #[arg(long, value_name = "FILE")]
        keymap: Option<PathBuf>,
    },

    /// Store settings
    Set {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        tone: Option<String>,

        /// Settings file to write instead of the default location
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },
}

impl CliCommand {
    /// Store pairs for a `set` command, in key order.
    ///
    /// Empty for other commands or when no value was given.
    pub fn settings_pairs(&self) -> Vec<(&'static str, &str)> {
        let CliCommand::Set {
            api_key,
            model,
            tone,
            ..
        } = self
        else {
            return Vec::new();
        };
        [(API_KEY, api_key), (MODEL, model), (TONE, tone)]
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_defaults_to_online() {
        let args = CliArgs::try_parse_from(["penmate", "replay", "demo.yaml"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Replay {
                scenario: PathBuf::from("demo.yaml"),
                offline: false,
                settings: None,
            }
        );
    }

    #[test]
    fn test_replay_offline_flag() {
        let args =
            CliArgs::try_parse_from(["penmate", "replay", "demo.yaml", "--offline"]).unwrap();
        assert!(matches!(args.command, CliCommand::Replay { offline: true, .. }));
    }

    #[test]
    fn test_replay_requires_scenario() {
        assert!(CliArgs::try_parse_from(["penmate", "replay"]).is_err());
    }

    #[test]
    fn test_set_pairs_skip_missing_values() {
        let args =
            CliArgs::try_parse_from(["penmate", "set", "--api-key", "sk-1", "--tone", "casual"])
                .unwrap();
        assert_eq!(
            args.command.settings_pairs(),
            vec![(API_KEY, "sk-1"), (TONE, "casual")]
        );
    }

    #[test]
    fn test_pairs_empty_for_other_commands() {
        let args = CliArgs::try_parse_from(["penmate", "keys"]).unwrap();
        assert!(args.command.settings_pairs().is_empty());
    }
}
