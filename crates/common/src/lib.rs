//! Shared types, configuration and error taxonomy for the review bot.

pub mod clock;
pub mod config;
pub mod error;
pub mod types;
