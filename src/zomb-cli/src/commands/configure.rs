//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up zomb CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `output_dir` - Optional default output directory
/// * `blacklist` - Path components to add to the blacklist
/// * `clear_blacklist` - Empty the blacklist before adding
/// * `show` - If true, show current configuration
pub fn handle(
    output_dir: Option<PathBuf>,
    blacklist: Vec<String>,
    clear_blacklist: bool,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, output_dir, blacklist, clear_blacklist) {
        show_usage();
        return Ok(());
    }

    let path = config.save()?;
    show_config(&config);
    println!("Config saved to: {}", path.display());

    Ok(())
}

/// Apply requested edits; returns false if nothing was requested
fn apply(
    config: &mut Config,
    output_dir: Option<PathBuf>,
    blacklist: Vec<String>,
    clear_blacklist: bool,
) -> bool {
    if output_dir.is_none() && blacklist.is_empty() && !clear_blacklist {
        return false;
    }

    if clear_blacklist {
        config.blacklist.clear();
    }
    for entry in blacklist {
        if !config.add_blacklist(entry.clone()) {
            println!("Already blacklisted: {}", entry);
        }
    }
    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
    }

    true
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.output_dir {
        Some(dir) => println!("Output directory: {}", dir.display()),
        None => println!("Output directory: {} (default)", crate::config::DEFAULT_OUTPUT_DIR),
    }

    if config.blacklist.is_empty() {
        println!("Blacklist: (empty)");
    } else {
        println!("Blacklist: {}", config.blacklist.join(", "));
    }

    println!("Encodings: {}", config.encodings.join(", "));

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: zomb configure --output-dir DIR");
    println!("   or: zomb configure --blacklist NAME [--blacklist NAME ...]");
    println!("   or: zomb configure --clear-blacklist");
    println!("   or: zomb configure --show");
    println!();
    println!("Blacklist entries match whole file or directory names anywhere in a");
    println!("scriptfile's path, e.g. `ammomaker_recipes.txt` or `tests`.");
}
