//! Shared value types.

pub mod environment;

pub use environment::Environment;
