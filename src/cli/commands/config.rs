//! Config command handler

use crate::args::ConfigSubcommand;
use campus_registrar::config::{Config, CONFIG_KEYS};
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => {
            handle_config_get(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            if let Some(k) = &key {
                if config.get(k).is_none() {
                    return Err(unknown_key(k));
                }
            }
            handle_config_get(config, key);
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => {
            let stdin = io::stdin();
            handle_config_reset(&mut stdin.lock())
        }
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: '{key}' (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}

/// Print one value, or the whole configuration when no key is given
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        if let Some(value) = config.get(&k) {
            println!("{value}");
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\n(file: {})", Config::get_config_file_path().display());
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Handle the config reset subcommand after a y/n confirmation read from `input`
pub fn handle_config_reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
