//! Initializers: the setup step of a hook specialization.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use hookwork_core::result::AppResult;

use crate::hook::Hook;

/// Setup behavior for one kind of hook (database connector, ORM binding, ...).
///
/// The loader calls [`initialize`](Self::initialize) once, and only when
/// the hook is enabled for the active environment. An `Err` marks the hook
/// as failed.
#[async_trait]
pub trait HookInitializer: Send + Sync + std::fmt::Debug {
    /// Defaults the hook starts from before its definition is applied.
    fn defaults(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Performs the hook's setup work.
    async fn initialize(&self, _hook: &Hook) -> AppResult<()> {
        Ok(())
    }
}

/// Initializer for hooks that need no setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInitializer;

#[async_trait]
impl HookInitializer for NoopInitializer {}

type InitFuture = Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'static>>;
type InitFn = dyn Fn(&Hook) -> InitFuture + Send + Sync;

/// A closure-based initializer for quick specializations.
pub struct FnInitializer {
    /// Defaults returned from [`HookInitializer::defaults`].
    defaults: Map<String, Value>,
    /// Setup function.
    init: Arc<InitFn>,
}

impl std::fmt::Debug for FnInitializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnInitializer")
            .field("defaults", &self.defaults)
            .field("init", &"<closure>")
            .finish()
    }
}

impl FnInitializer {
    /// Creates an initializer from an async closure.
    ///
    /// The closure receives the hook and must copy out anything the
    /// returned future needs.
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn(&Hook) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self {
            defaults: Map::new(),
            init: Arc::new(move |hook: &Hook| -> InitFuture { Box::pin(init(hook)) }),
        }
    }

    /// Sets the defaults this specialization supplies.
    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }
}

#[async_trait]
impl HookInitializer for FnInitializer {
    fn defaults(&self) -> Map<String, Value> {
        self.defaults.clone()
    }

    async fn initialize(&self, hook: &Hook) -> AppResult<()> {
        (self.init)(hook).await
    }
}
