//! Hookwork — loads the configured hooks for the active environment.

use tracing_subscriber::{EnvFilter, fmt};

use hookwork_core::config::AppConfig;
use hookwork_core::error::AppError;
use hookwork_core::types::environment::Environment;
use hookwork_hooks::HookLoader;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Hook loading failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `HOOKWORK_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = match std::env::var("HOOKWORK_ENV") {
        Ok(name) => name.parse::<Environment>()?,
        Err(_) => Environment::default(),
    };

    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting Hookwork v{}",
        env!("CARGO_PKG_VERSION")
    );

    let loader = HookLoader::new().with_timeout(config.hooks.load_timeout());
    let report = loader
        .load_all(config.hooks.definitions, &config.environment)
        .await?;

    for loaded in loader.registry().list().await {
        tracing::info!(
            hook = %loaded.name(),
            status = %loaded.status,
            loaded_at = %loaded.loaded_at,
            "Hook ready"
        );
    }

    tracing::info!(
        total = report.total(),
        initialized = report.initialized.len(),
        skipped = report.skipped.len(),
        "All hooks loaded"
    );

    Ok(())
}
