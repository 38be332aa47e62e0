//! CLI crate for the GetIn bot binary.

pub mod cli;

pub use cli::{load_config, Cli, Commands};
