//! # Dialogue Rules
//!
//! The "rule book" crate - contains the variable store and the expression model
//! (conditions, effects, operators, sandboxed arithmetic) that gate and mutate a
//! conversation. This crate holds no session logic and never performs I/O.

pub mod arithmetic;
pub mod error;
pub mod expressions;
pub mod globals;
pub mod operators;

pub use arithmetic::*;
pub use error::*;
pub use expressions::*;
pub use globals::*;
pub use operators::*;
