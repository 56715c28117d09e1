//! CLI subcommand implementations.

pub mod demo;
pub mod plugins;
pub mod show;
pub mod validate;
