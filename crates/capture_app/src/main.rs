mod terminal;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use terminal::config::{self, AppConfig, DEFAULT_CONFIG_PATH};
use terminal::logging::{self, LogDestination};

#[derive(Parser)]
#[command(name = "capture_client")]
#[command(about = "Terminal client for the web page capture server")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Capture server address; overrides the config file
    #[arg(short, long)]
    server: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    log: LogDestination,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture one page and wait until it finishes
    Capture {
        /// Page address
        url: String,
    },

    /// Print the stored captures
    List,

    /// Write a default configuration file
    InitConfig {
        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    match cli.command {
        Some(Commands::InitConfig { force }) => {
            config::write_config(&cli.config, &AppConfig::default(), force)?;
            println!("Wrote {}", cli.config.display());
            Ok(())
        }
        Some(Commands::Capture { url }) => {
            let config = load_config(&cli.config, cli.server);
            terminal::run_capture(&config, url)
        }
        Some(Commands::List) => terminal::run_list(&load_config(&cli.config, cli.server)),
        None => terminal::run_interactive(&load_config(&cli.config, cli.server)),
    }
}

fn load_config(path: &Path, server: Option<String>) -> AppConfig {
    let mut config = AppConfig::load(path);
    if let Some(server) = server {
        config.server_url = server;
    }
    config
}
