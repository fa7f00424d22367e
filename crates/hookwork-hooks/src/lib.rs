//! # hookwork-hooks
//!
//! Hook framework for Hookwork. Provides:
//!
//! - [`Hook`]: a definition merged with its defaults, gated by environment
//! - [`HookInitializer`]: the setup step a hook specialization supplies
//! - [`HookLoader`]: loads a set of hook definitions for one environment
//! - [`LoadedHookRegistry`]: the hooks that made it through loading

pub mod hook;
pub mod initializer;
pub mod loader;
pub mod registry;

pub use hook::{Hook, LoadStatus, LoadedHook};
pub use initializer::{FnInitializer, HookInitializer, NoopInitializer};
pub use loader::{HookLoader, LoadReport};
pub use registry::LoadedHookRegistry;
