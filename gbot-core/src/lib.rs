//! Core types and traits shared by the GetIn bot crates.
//!
//! ## Modules
//!
//! - [`types`] – User, Chat, Message, Command
//! - [`error`] – GbotError and Result
//! - [`bot`] – transport-agnostic Bot trait
//! - [`logger`] – tracing initialization

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{GbotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Command, Message, ToCoreMessage, ToCoreUser, User};
