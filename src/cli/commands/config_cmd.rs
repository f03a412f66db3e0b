//! Configuration display command.

use console::style;

use crate::config::{Config, Settings};

/// Print the resolved settings and where they came from.
pub async fn cmd_config(settings: &Settings, config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    match config.source_path {
        Some(ref path) => println!("{} Config file: {}", style("→").cyan(), path.display()),
        None => println!("{} No config file found, using defaults", style("!").yellow()),
    }

    println!("  public_dir:        {}", settings.public_dir.display());
    println!("  cv_filename:       {}", settings.cv_filename);
    println!("  bind:              {}", settings.bind);
    println!("  slide_interval_ms: {}", settings.slide_interval_ms);

    Ok(())
}
