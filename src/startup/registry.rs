use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

type SyncInitializer<T> = Box<dyn FnOnce(Arc<T>) -> anyhow::Result<()> + Send>;
type AsyncInitializer<T> = Box<dyn FnOnce(Arc<T>) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// Callback run once configuration is available
pub enum InitializerKind<T> {
    Sync(SyncInitializer<T>),
    Async(AsyncInitializer<T>),
}

/// Named startup callback
pub struct StartupInitializer<T> {
    pub name: String,
    pub kind: InitializerKind<T>,
}

/// Ordered collection of startup callbacks
pub struct InitializerRegistry<T> {
    initializers: Vec<StartupInitializer<T>>,
}

impl<T> InitializerRegistry<T> {
    pub fn new() -> Self {
        Self {
            initializers: Vec::new(),
        }
    }

    /// Register a callback that runs inline
    pub fn register_sync<F>(&mut self, name: impl Into<String>, initializer: F) -> &mut Self
    where
        F: FnOnce(Arc<T>) -> anyhow::Result<()> + Send + 'static,
    {
        self.initializers.push(StartupInitializer {
            name: name.into(),
            kind: InitializerKind::Sync(Box::new(initializer)),
        });
        self
    }

    /// Register a callback whose future is awaited before startup completes
    pub fn register_async<F, Fut>(&mut self, name: impl Into<String>, initializer: F) -> &mut Self
    where
        F: FnOnce(Arc<T>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.initializers.push(StartupInitializer {
            name: name.into(),
            kind: InitializerKind::Async(Box::new(move |config| initializer(config).boxed())),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.initializers.iter().map(|i| i.name.as_str())
    }

    pub(crate) fn into_initializers(self) -> Vec<StartupInitializer<T>> {
        self.initializers
    }
}

impl<T> Default for InitializerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
