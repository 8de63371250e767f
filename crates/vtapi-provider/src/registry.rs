//! Provider registry.
//!
//! Factories are registered while the registry is being assembled at
//! startup. Once installed as the process-wide registry it is immutable, so
//! resolution needs no locking.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::provider::TranscodingProvider;

/// Builds a provider from configuration. Must validate the configuration
/// before creating any backend client.
pub type ProviderFactory = fn(&ProviderConfig) -> ProviderResult<Arc<dyn TranscodingProvider>>;

static GLOBAL_REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Mapping from provider name to factory.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. Each name can be registered once.
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) -> ProviderResult<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ProviderError::DuplicateProvider(name));
        }
        debug!(provider = %name, "Registered provider factory");
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, name: impl Into<String>, factory: ProviderFactory) -> ProviderResult<Self> {
        self.register(name, factory)?;
        Ok(self)
    }

    /// Build the named provider from configuration.
    pub fn resolve(&self, name: &str, config: &ProviderConfig) -> ProviderResult<Arc<dyn TranscodingProvider>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ProviderError::unknown_provider(name))?;
        factory(config)
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Install this registry as the process-wide registry.
    ///
    /// Can be done once; later attempts fail with `RegistryAlreadyInstalled`.
    pub fn install(self) -> ProviderResult<&'static ProviderRegistry> {
        GLOBAL_REGISTRY
            .set(self)
            .map_err(|_| ProviderError::RegistryAlreadyInstalled)?;
        Ok(global())
    }
}

/// The process-wide registry. Empty until [`ProviderRegistry::install`] runs.
pub fn global() -> &'static ProviderRegistry {
    static EMPTY: OnceLock<ProviderRegistry> = OnceLock::new();
    GLOBAL_REGISTRY
        .get()
        .unwrap_or_else(|| EMPTY.get_or_init(ProviderRegistry::new))
}

/// Resolve a provider through the process-wide registry.
pub fn resolve(name: &str, config: &ProviderConfig) -> ProviderResult<Arc<dyn TranscodingProvider>> {
    global().resolve(name, config)
}
