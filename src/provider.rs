//! Backend providers: the local catalog and the token-gated remote client.
//!
//! Both sides speak the same [`Provider`] interface: an ordered catalog of
//! [`BackendDescriptor`]s and a lookup-by-name constructor that receives the
//! caller's keyword options untouched. Executing circuits is the job of the
//! backends a provider builds, not of this crate.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{Backend, BackendOptions};
use crate::capability::Capabilities;
use crate::catalog::DEFAULT_BACKEND;
use crate::error::{HalError, HalResult};

/// One entry of a provider catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendDescriptor {
    pub name: String,
    pub capabilities: Capabilities,
}

impl BackendDescriptor {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            name: capabilities.name.clone(),
            capabilities,
        }
    }
}

/// A catalog of backends with a constructor for each entry.
pub trait Provider<C>: Send + Sync {
    /// Human-readable provider name, used in log messages.
    fn name(&self) -> &str;

    /// Catalog entries in lookup order.
    fn backends(&self) -> Vec<BackendDescriptor>;

    /// Build the backend listed under `name`.
    ///
    /// Returns `Ok(None)` when this provider cannot construct `name`.
    fn get_backend(
        &self,
        name: &str,
        options: &BackendOptions,
    ) -> HalResult<Option<Arc<dyn Backend<C>>>>;

    /// The backend used when a requested name is not in the catalog.
    fn default_backend(&self, options: &BackendOptions) -> HalResult<Option<Arc<dyn Backend<C>>>>;

    fn backend_names(&self) -> Vec<String> {
        self.backends().into_iter().map(|d| d.name).collect()
    }
}

/// Client for backends hosted by Alice & Bob, gated by an API token.
pub trait RemoteClient<C>: Send + Sync {
    /// Open a provider authenticated with `token`.
    fn connect(&self, token: &ApiToken) -> HalResult<Arc<dyn Provider<C>>>;
}

/// Access credential for the remote provider.
///
/// An empty (or single-character) token means "local only".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Whether this token asks for the remote variant of a backend.
    pub fn requests_remote(&self) -> bool {
        self.0.chars().count() > 1
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiToken(\"\")")
        } else {
            f.write_str("ApiToken([REDACTED])")
        }
    }
}

impl From<&str> for ApiToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Factory building a backend for one catalog entry.
type LocalFactory<C> =
    Box<dyn Fn(&BackendDescriptor, &BackendOptions) -> HalResult<Arc<dyn Backend<C>>> + Send + Sync>;

struct LocalEntry<C> {
    descriptor: BackendDescriptor,
    factory: LocalFactory<C>,
}

/// Provider for backends that run on the caller's machine.
///
/// Entries keep registration order, so the first entry registered under a
/// name is the one lookups find.
pub struct LocalProvider<C> {
    entries: Vec<LocalEntry<C>>,
    default_name: String,
}

impl<C> LocalProvider<C> {
    /// An empty provider whose designated default is [`DEFAULT_BACKEND`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            default_name: DEFAULT_BACKEND.to_string(),
        }
    }

    /// A provider listing every descriptor, all built by the same `factory`.
    pub fn with_catalog<F>(descriptors: impl IntoIterator<Item = BackendDescriptor>, factory: F) -> Self
    where
        F: Fn(&BackendDescriptor, &BackendOptions) -> HalResult<Arc<dyn Backend<C>>>
            + Send
            + Sync
            + Clone
            + 'static,
    {
        let mut provider = Self::new();
        for descriptor in descriptors {
            provider.register(descriptor, factory.clone());
        }
        provider
    }

    /// Designate the backend returned for unknown names.
    ///
    /// The name must already be registered.
    pub fn with_default(mut self, name: impl Into<String>) -> HalResult<Self> {
        let name = name.into();
        if !self.entries.iter().any(|e| e.descriptor.name == name) {
            return Err(HalError::Configuration(format!(
                "default backend '{name}' is not in the local catalog"
            )));
        }
        self.default_name = name;
        Ok(self)
    }

    pub fn register<F>(&mut self, descriptor: BackendDescriptor, factory: F)
    where
        F: Fn(&BackendDescriptor, &BackendOptions) -> HalResult<Arc<dyn Backend<C>>>
            + Send
            + Sync
            + 'static,
    {
        debug!("Registering local backend: {}", descriptor.name);
        self.entries.push(LocalEntry {
            descriptor,
            factory: Box::new(factory),
        });
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }
}

impl<C> Default for LocalProvider<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Provider<C> for LocalProvider<C> {
    fn name(&self) -> &str {
        "alice-bob-local"
    }

    fn backends(&self) -> Vec<BackendDescriptor> {
        self.entries.iter().map(|e| e.descriptor.clone()).collect()
    }

    fn get_backend(
        &self,
        name: &str,
        options: &BackendOptions,
    ) -> HalResult<Option<Arc<dyn Backend<C>>>> {
        match self.entries.iter().find(|e| e.descriptor.name == name) {
            Some(entry) => (entry.factory)(&entry.descriptor, options).map(Some),
            None => Ok(None),
        }
    }

    fn default_backend(&self, options: &BackendOptions) -> HalResult<Option<Arc<dyn Backend<C>>>> {
        self.get_backend(&self.default_name, options)
    }
}
