//! GuidepostCli application.
//!
//! Ties together configuration, logging, catalog loading, and command
//! dispatch. Generic over [`ConfigProvider`] so tests and embedders can
//! supply their own configuration.

use crate::cli::{CliArgs, Command};
use crate::config::GuidepostConfig;
use crate::{config_handlers, guide_handlers};
use guidepost_core::traits::ConfigProvider;
use guidepost_core::Result;
use guidepost_registry::{AppState, Catalog};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// GuidepostCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct GuidepostCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl GuidepostCli<GuidepostConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = GuidepostConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> GuidepostCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Library crates log through `log`; the fmt subscriber picks those
    /// records up as well.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Build the catalog from the configured guides directory.
    pub async fn load_state(&self) -> Result<AppState<C>> {
        AppState::load(C::clone(&self.config)).await
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(command) => {
                let state = self.load_state().await?;
                tracing::debug!(
                    project = state.project_name(),
                    guides = state.catalog().len(),
                    "catalog loaded"
                );
                self.dispatch(state.catalog(), command)
            }
            None => {
                println!("{} {} - use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    /// Dispatch catalog commands to handlers.
    fn dispatch(&self, catalog: &Catalog, command: Command) -> Result<()> {
        match command {
            Command::Show { slug, json } => guide_handlers::handle_show(catalog, &slug, json),
            Command::Tag { tag } => guide_handlers::handle_tag(catalog, &tag),
            Command::Category { category } => guide_handlers::handle_category(catalog, &category),
            Command::Tags => guide_handlers::handle_tags(catalog),
            Command::Categories => guide_handlers::handle_categories(catalog),
            Command::Validate { strict } => {
                guide_handlers::handle_validate(catalog, strict || self.config.strict_related())
            }
            Command::Stats { json } => guide_handlers::handle_stats(catalog, json),
            Command::Version | Command::Config(_) => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
