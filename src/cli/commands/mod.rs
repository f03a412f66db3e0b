//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod gallery;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Portfolio site with live image carousels")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default from config, else 127.0.0.1:3030)
        bind: Option<String>,
    },

    /// List gallery categories and their images
    Gallery,

    /// Show resolved settings
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let (settings, config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Gallery => gallery::cmd_gallery(&settings).await,
        Commands::Config { json } => config_cmd::cmd_config(&settings, &config, json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_bind_is_optional() {
        let cli = Cli::try_parse_from(["portfolio", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind: None }));

        let cli = Cli::try_parse_from(["portfolio", "-v", "serve", "8080"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "8080"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["portfolio", "config", "--json", "--cwd", "-c", "site.toml"])
                .unwrap();
        assert!(cli.cwd);
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert!(matches!(cli.command, Commands::Config { json: true }));
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["portfolio", "crawl"]).is_err());
    }
}
