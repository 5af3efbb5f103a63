//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

use crate::config::CONFIG_ENV_VAR;

// ============================================================================
// CLI argument types
// ============================================================================

/// Browse and check a corpus of Markdown/MDX guides.
#[derive(Parser, Debug)]
#[command(name = "guidepost", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a guide's metadata and resolved related guides.
    Show {
        /// Guide slug.
        slug: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List guides carrying a tag, newest first.
    Tag {
        /// Tag (case-insensitive).
        tag: String,
    },

    /// List guides in a category, newest first.
    Category {
        /// Category name, e.g. `devops` or `qa-testing`.
        category: String,
    },

    /// List every tag with its guide count.
    Tags,

    /// List every category with its guide count.
    Categories,

    /// Check related-guide references.
    Validate {
        /// Treat dangling references as errors.
        #[arg(long)]
        strict: bool,
    },

    /// Show catalog statistics.
    Stats {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "content.path").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "content.path").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
