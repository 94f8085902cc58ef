//! # Dialogue Core
//!
//! The interpreter of the branching-dialogue system. This crate builds a validated
//! prompt graph from an authoring document and drives a single conversation across
//! it, using `dialogue_rules` for every condition and effect.
//!
//! ## Core Components
//!
//! - **document**: Authoring document schema and JSON/TOML loading
//! - **graph**: Prompts, responses, transitions and payloads
//! - **session**: The `Dialogue` state machine and the `Conversation` trait presentation
//!   adapters drive it through
//!
//! ## Design Philosophy
//!
//! - **No I/O in the walk**: the session never prints or reads input
//! - **Fail at load**: malformed content is rejected before a session exists
//! - **Isolated sessions**: every `Dialogue` owns its store and graph

pub mod document;
pub mod error;
pub mod graph;
pub mod session;

pub use document::*;
pub use error::*;
pub use graph::*;
pub use session::*;
