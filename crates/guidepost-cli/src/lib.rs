//! Command-line front end for a Guidepost guide corpus.
//!
//! # Key Abstractions
//!
//! - [`GuidepostCli<C>`](app::GuidepostCli): CLI parameterized over a config provider
//! - [`GuidepostConfig`](config::GuidepostConfig): TOML/env configuration via `confyg`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod guide_handlers;

pub use app::GuidepostCli;
pub use cli::{CliArgs, Command, ConfigAction};
pub use config::GuidepostConfig;
