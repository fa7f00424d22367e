//! Convenience result type alias for Hookwork.

use crate::error::AppError;

/// A specialized `Result` type for Hookwork operations.
pub type AppResult<T> = Result<T, AppError>;
