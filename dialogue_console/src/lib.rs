//! # Dialogue Console
//!
//! A terminal presentation adapter for `dialogue_core`. It renders prompts and
//! numbered responses, reads the player's choice, and feeds it back through the
//! `Conversation` trait. All I/O of the system lives here.

pub mod config;
pub mod engine;

pub use config::*;
pub use engine::*;
