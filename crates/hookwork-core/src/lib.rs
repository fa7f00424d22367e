//! # hookwork-core
//!
//! Core crate for Hookwork. Contains configuration schemas, typed hook
//! definitions, the runtime [`Environment`](types::environment::Environment)
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Hookwork crates.

pub mod config;
pub mod definition;
pub mod error;
pub mod result;
pub mod types;

pub use definition::{HookDefinition, HookSettings};
pub use error::AppError;
pub use result::AppResult;
pub use types::environment::Environment;
