//! Command-line interface for cmdkit
//!
//! Global settings are bound through [`ConfigBinder`], so each one can come
//! from a flag, a `CMDKIT_*` variable, the config file or its default.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cmdkit::config::{load_config, ConfigBinder, ConfigContext, Provenance};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod settings;
mod show;
mod text;
mod utils;
mod web;

use settings::{Settings, CONFIG_CANDIDATES, ENV_PREFIX};

/// Flag, environment and config-file binding plus small text and URL helpers
#[derive(Parser)]
#[command(name = "cmdkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (YAML or TOML); defaults to cmdkit.{yaml,toml} in the working directory
    #[arg(long, global = true, env = "CMDKIT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the password in a URL with ***
    MaskUrl(web::MaskUrlArgs),

    /// Print the cleaned path component of a URL
    UrlPath(web::UrlPathArgs),

    /// Substitute :name parameters in a path template
    Expand(text::ExpandArgs),

    /// Truncate text to a character limit
    Truncate(text::TruncateArgs),

    /// Print the environment variable a setting name maps to
    EnvName(text::EnvNameArgs),

    /// Print every setting with its value and where it came from
    ShowConfig,
}

/// Everything resolved before a subcommand runs.
pub struct Resolved {
    pub settings: Settings,
    pub provenance: Provenance,
    pub config_path: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let mut settings = Settings::default();
    let (cli, provenance, config_path) = {
        let mut binder = ConfigBinder::new(settings.bindings());
        let matches = binder.register(Cli::command())?.get_matches();
        let cli = Cli::from_arg_matches(&matches)?;

        // Config loading and resolution log before the settings that shape logging exist.
        let _bootstrap = tracing::subscriber::set_default(bootstrap_subscriber(cli.verbose));
        let (ctx, config_path) = config_context(cli.config.as_deref())?;
        let provenance = binder.resolve(&ctx, &matches)?;
        (cli, provenance, config_path)
    };

    init_tracing(cli.verbose, &settings)?;
    tracing::debug!(config = ?config_path, "settings resolved");
    for (name, origin) in &provenance {
        tracing::debug!(setting = %name, %origin, "setting origin");
    }

    let resolved = Resolved { settings, provenance, config_path };
    match cli.command {
        Commands::MaskUrl(args) => web::mask_url(args),
        Commands::UrlPath(args) => web::url_path(args),
        Commands::Expand(args) => text::expand(args, &resolved),
        Commands::Truncate(args) => text::truncate(args, &resolved),
        Commands::EnvName(args) => text::env_name(args),
        Commands::ShowConfig => show::run(&resolved),
    }
}

/// Process-environment context, with the explicit or discovered config file attached.
fn config_context(explicit: Option<&Path>) -> Result<(ConfigContext, Option<PathBuf>)> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let ctx = ConfigContext::new(ENV_PREFIX);
    match load_config(&cwd, explicit, CONFIG_CANDIDATES).context("Failed to load config")? {
        Some((figment, path)) => Ok((ctx.with_source(figment), Some(path))),
        None => Ok((ctx, None)),
    }
}

// RUST_LOG in the environment always takes precedence over `level`.
fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Thread-scoped subscriber used until the resolved settings install the global one.
fn bootstrap_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(level))
}

// --verbose falls back to DEBUG, otherwise the log.level setting applies.
fn init_tracing(verbose: bool, settings: &Settings) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        settings
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", settings.log_level))?
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(settings.log_ansi))
        .with(env_filter(level))
        .try_init();
    Ok(())
}
