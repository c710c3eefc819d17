//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::fmt;
use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::backend::BackendClient;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::diagnostics::init_file_tracing;
use crate::utils::url::is_http_url;

#[derive(Parser, Debug)]
#[command(name = "medichat", version)]
#[command(about = "A terminal client for a medical chatbot and health-risk service")]
#[command(
    long_about = "MediChat is a full-screen terminal interface for a medical assistant backend. \
The Chat tab talks to the assistant; the Health Risk tab sends your readings to the risk \
model and shows one card per condition.\n\n\
Controls:\n\
  F1/F2, Alt+1/2    Switch between Chat and Health Risk\n\
  Enter             Send the message / submit the form\n\
  Alt+Enter         New line in the message\n\
  Tab, Up/Down      Move between form fields\n\
  PageUp/PageDown   Scroll the conversation or the results\n\
  Esc               Close the newest error banner\n\
  Ctrl+R            Check the backend connection again\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Append the chat transcript to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Write diagnostic tracing output to the specified file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the interface (default)
    Chat,
    /// Probe the backend once and print the result
    Check,
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, transcript-log)
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    UnknownKey(String),
    InvalidUrl(String),
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(
                f,
                "Unknown config key: {key}. Available keys: base-url, transcript-log"
            ),
            SettingError::InvalidUrl(value) => {
                write!(f, "Invalid base URL: {value} (expected http:// or https://)")
            }
        }
    }
}

impl Error for SettingError {}

/// Apply `set <key> <value>` to a config and describe the change.
pub fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<String, SettingError> {
    let value = value.trim();
    match key {
        "base-url" => {
            if !is_http_url(value) {
                return Err(SettingError::InvalidUrl(value.to_string()));
            }
            config.base_url = Some(value.to_string());
            Ok(format!("✅ Set base-url to: {value}"))
        }
        "transcript-log" => {
            config.transcript_log = Some(value.to_string());
            Ok(format!("✅ Set transcript-log to: {value}"))
        }
        other => Err(SettingError::UnknownKey(other.to_string())),
    }
}

/// Pick the backend URL for this run, rejecting a `--base-url` without an http(s) scheme.
pub fn resolve_base_url(config: &Config, flag: Option<&str>) -> Result<String, SettingError> {
    if let Some(value) = flag.map(str::trim).filter(|value| !value.is_empty()) {
        if !is_http_url(value) {
            return Err(SettingError::InvalidUrl(value.to_string()));
        }
    }
    Ok(config.resolve_base_url(flag))
}

pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "base-url" => {
            config.base_url = None;
            Ok("✅ Unset base-url".to_string())
        }
        "transcript-log" => {
            config.transcript_log = None;
            Ok("✅ Unset transcript-log".to_string())
        }
        other => Err(SettingError::UnknownKey(other.to_string())),
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = args.debug_log.as_deref() {
        init_file_tracing(Path::new(path))?;
    }

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let base_url = resolve_base_url(&config, args.base_url.as_deref())?;
            let log = config.resolve_transcript_log(args.log.as_deref());
            info!(%base_url, "launching interactive session");
            run_chat(base_url, log).await
        }
        Commands::Check => {
            let config = Config::load()?;
            let base_url = resolve_base_url(&config, args.base_url.as_deref())?;
            let backend = BackendClient::new(&base_url);
            match backend.check_health().await {
                Ok(report) if report.is_degraded() => {
                    println!(
                        "⚠️  {base_url} is reachable but reported a problem: {}",
                        report.problem_summary()
                    );
                    std::process::exit(1);
                }
                Ok(report) => {
                    let status = report.status.as_deref().unwrap_or("ok");
                    println!("✅ {base_url} is reachable (status: {status})");
                    Ok(())
                }
                Err(err) => {
                    eprintln!("❌ Unable to connect to the server: {err}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let message = apply_set(&mut config, &key, &value)?;
            config.save()?;
            println!("{message}");
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            let message = apply_unset(&mut config, &key)?;
            config.save()?;
            println!("{message}");
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            if let Ok(path) = Config::get_config_path() {
                println!("  config file: {}", path.display());
            }
            Ok(())
        }
    }
}
