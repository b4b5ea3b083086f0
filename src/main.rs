use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use penmate::cli::{CliArgs, CliCommand};
use penmate::config::AssistConfig;
use penmate::generation::{EchoGenerator, OpenAiGenerator, TextGenerator};
use penmate::keymap::{load_default_keymap, load_keymap_file, Keymap};
use penmate::scenario::{load_scenario, replay};
use penmate::settings::{FileStore, Settings, SettingsStore};

fn main() -> Result<()> {
    penmate::tracing::init();

    let args = CliArgs::parse();
    match &args.command {
        CliCommand::Replay {
            scenario,
            offline,
            settings,
        } => run_replay(scenario, *offline, settings.clone()),
        CliCommand::Keys { keymap } => print_keys(keymap.as_deref()),
        CliCommand::Set { settings, .. } => {
            let pairs = args.command.settings_pairs();
            if pairs.is_empty() {
                bail!("Nothing to set; pass --api-key, --model or --tone");
            }
            let mut store = settings_store(settings.clone())?;
            store.set(&pairs)?;
            println!("Saved {} setting(s) to {}", pairs.len(), store.path().display());
            Ok(())
        }
    }
}

fn settings_store(path: Option<PathBuf>) -> Result<FileStore> {
    match path {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::default_location().context("No config directory available"),
    }
}

fn run_replay(path: &Path, offline: bool, settings_path: Option<PathBuf>) -> Result<()> {
    let scenario = load_scenario(path)?;
    let settings = match settings_store(settings_path) {
        Ok(store) => Settings::load(&store)?,
        Err(e) => {
            tracing::warn!("{:#}, using default settings", e);
            Settings::default()
        }
    };
    let config = AssistConfig::load();

    let generator: Arc<dyn TextGenerator> = if offline {
        Arc::new(EchoGenerator)
    } else {
        Arc::new(OpenAiGenerator::new(
            config.endpoint.clone(),
            config.request_timeout(),
        )?)
    };

    let report = replay(&scenario, settings, config, generator)?;
    for (name, text) in &report.fields {
        println!("{}: {:?}", name, text);
    }
    for toast in &report.toasts {
        println!("toast: {}", toast);
    }

    if !report.passed() {
        for failure in &report.failures {
            eprintln!("FAIL {}", failure);
        }
        bail!("{} expectation(s) failed", report.failures.len());
    }
    Ok(())
}

fn print_keys(path: Option<&Path>) -> Result<()> {
    let bindings = match path {
        Some(path) => load_keymap_file(path)
            .with_context(|| format!("Failed to load keymap {}", path.display()))?,
        None => load_default_keymap(),
    };
    let keymap = Keymap::with_bindings(bindings);

    for binding in keymap.bindings() {
        let when = binding
            .when
            .as_ref()
            .map(|conditions| {
                let names: Vec<String> = conditions.iter().map(|c| format!("{:?}", c)).collect();
                format!("  (when {})", names.join(", "))
            })
            .unwrap_or_default();
        println!(
            "{:<20} {}{}",
            binding.keystroke.to_string(),
            binding.command.display_name(),
            when
        );
    }
    Ok(())
}
