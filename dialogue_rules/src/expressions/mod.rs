//! Expressions evaluated against the variable store.
//!
//! - **Conditions** gate responses and transitions
//! - **Effects** mutate the store when a response is chosen

mod condition;
mod effect;

pub use condition::*;
pub use effect::*;
