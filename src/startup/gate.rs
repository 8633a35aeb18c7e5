//! Two-phase startup: configuration first, then dependent initializers

use std::sync::Arc;

use futures::future::try_join_all;

use crate::remote::{ConfigFetcher, ConfigurationService, FromConfigJson};
use crate::startup::error::{StartupError, StartupResult};
use crate::startup::registry::{InitializerKind, InitializerRegistry};

/// Load configuration, then run the registered initializers
///
/// Initializers run in registration order and only after the configuration
/// is stored. Synchronous ones run inline. Asynchronous ones are spawned on
/// the tokio runtime the moment they are reached, so they keep running even
/// if a later synchronous initializer fails, and the rest are not cancelled
/// when one of them fails. Startup waits for all of them and reports the
/// first failure.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// - [`StartupError::Configuration`] if loading fails; no initializer runs
/// - [`StartupError::Initializer`] naming the first initializer that failed
pub async fn bootstrap<T, F>(
    service: &ConfigurationService<T, F>,
    registry: InitializerRegistry<T>,
) -> StartupResult<Arc<T>>
where
    T: FromConfigJson + Send + Sync + 'static,
    F: ConfigFetcher,
{
    tracing::info!("Loading configuration");
    service.init().await?;
    let configuration = service.configuration()?;

    if registry.is_empty() {
        tracing::info!("Startup complete");
        return Ok(configuration);
    }

    tracing::info!(initializers = registry.len(), "Running startup initializers");

    let mut pending = Vec::new();
    for initializer in registry.into_initializers() {
        let name = initializer.name;
        match initializer.kind {
            InitializerKind::Sync(run) => {
                tracing::debug!(initializer = %name, "Running startup initializer");
                run(Arc::clone(&configuration))
                    .map_err(|source| StartupError::Initializer { name, source })?;
            }
            InitializerKind::Async(start) => {
                tracing::debug!(initializer = %name, "Starting startup initializer");
                let task = tokio::spawn(start(Arc::clone(&configuration)));
                pending.push(async move {
                    match task.await {
                        Ok(result) => {
                            result.map_err(|source| StartupError::Initializer { name, source })
                        }
                        Err(join_error) => Err(StartupError::Initializer {
                            name,
                            source: join_error.into(),
                        }),
                    }
                });
            }
        }
    }

    try_join_all(pending).await.inspect_err(|e| {
        tracing::error!(error = %e, "Startup initializer failed");
    })?;

    tracing::info!("Startup complete");
    Ok(configuration)
}
