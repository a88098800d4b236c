//! # Runtime
//!
//! Process startup.

pub mod initialization;

pub use initialization::{initialize, initialize_from};
