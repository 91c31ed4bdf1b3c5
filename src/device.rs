//! The `alicebob.qubit` device: the adapter's public entry point.
//!
//! [`AliceBobDevice`] resolves a backend name against the Alice & Bob
//! providers, attaches a [`DeviceConfiguration`](crate::DeviceConfiguration)
//! overlay carrying the requested wire count, and hands the result to the
//! host framework's generic device factory. Construction is a single
//! synchronous call; every later circuit execution belongs to the device the
//! factory returns.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backend::BackendOptions;
use crate::catalog::DEFAULT_BACKEND;
use crate::configured::ConfiguredBackend;
use crate::error::{HalError, HalResult};
use crate::provider::{ApiToken, Provider, RemoteClient};
use crate::remote_device::{DeviceFactory, RemoteDevice, RemoteDeviceFactory};
use crate::resolver::{Resolution, resolve};

/// Short name under which the device is registered with the host framework.
pub const DEVICE_NAME: &str = "alicebob.qubit";

/// Where a device draws its sampling randomness from.
///
/// Serialized as `"global"` or as an integer seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeedRepr", into = "SeedRepr")]
pub enum SeedSource {
    /// The process-wide default RNG.
    #[default]
    Global,
    Fixed(u64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Fixed(u64),
    Named(String),
}

impl TryFrom<SeedRepr> for SeedSource {
    type Error = String;

    fn try_from(repr: SeedRepr) -> Result<Self, Self::Error> {
        match repr {
            SeedRepr::Fixed(seed) => Ok(SeedSource::Fixed(seed)),
            SeedRepr::Named(name) if name == "global" => Ok(SeedSource::Global),
            SeedRepr::Named(name) => Err(format!(
                "unknown seed '{name}', expected \"global\" or an integer"
            )),
        }
    }
}

impl From<SeedSource> for SeedRepr {
    fn from(seed: SeedSource) -> Self {
        match seed {
            SeedSource::Global => SeedRepr::Named("global".into()),
            SeedSource::Fixed(seed) => SeedRepr::Fixed(seed),
        }
    }
}

/// Options accepted when constructing an `alicebob.qubit` device.
///
/// Unrecognized JSON keys are collected into `options` and forwarded to the
/// provider, so `{"wires": 3, "kappa_1": 100}` sets `kappa_1` for the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceOptions {
    pub wires: u32,
    pub shots: u32,
    pub seed: SeedSource,
    /// Accepted for compatibility; never forwarded, execution stays sequential.
    pub max_workers: Option<usize>,
    pub alice_backend: String,
    /// Empty means local-only.
    #[serde(skip_serializing)]
    pub api_token: ApiToken,
    #[serde(flatten)]
    pub options: BackendOptions,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            wires: 1,
            shots: 1024,
            seed: SeedSource::Global,
            max_workers: None,
            alice_backend: DEFAULT_BACKEND.to_string(),
            api_token: ApiToken::default(),
            options: BackendOptions::new(),
        }
    }
}

impl DeviceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> HalResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HalError::Configuration(format!("invalid device options: {e}")))
    }

    pub fn with_wires(mut self, wires: u32) -> Self {
        self.wires = wires;
        self
    }

    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: SeedSource) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    pub fn with_backend(mut self, name: impl Into<String>) -> Self {
        self.alice_backend = name.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<ApiToken>) -> Self {
        self.api_token = token.into();
        self
    }

    /// Add a keyword option forwarded to the backend constructor.
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Alice & Bob device constructor bound to a local provider and a remote client.
pub struct AliceBobDevice<C> {
    local: Arc<dyn Provider<C>>,
    remote: Arc<dyn RemoteClient<C>>,
}

impl<C> fmt::Debug for AliceBobDevice<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliceBobDevice")
            .field("local", &self.local.name())
            .finish_non_exhaustive()
    }
}

impl<C: Sync> AliceBobDevice<C> {
    pub fn new(local: Arc<dyn Provider<C>>, remote: Arc<dyn RemoteClient<C>>) -> Self {
        Self { local, remote }
    }

    pub fn name(&self) -> &'static str {
        DEVICE_NAME
    }

    /// Resolve `backend` to a handle; see [`resolve`] for the selection rules.
    pub fn configured_backend(
        &self,
        backend: &str,
        api_token: &ApiToken,
        options: &BackendOptions,
    ) -> HalResult<Option<Resolution<C>>> {
        resolve(
            backend,
            api_token,
            options,
            self.local.as_ref(),
            self.remote.as_ref(),
        )
    }

    /// Build a [`RemoteDevice`] for `options`.
    pub fn create(&self, options: DeviceOptions) -> HalResult<RemoteDevice<C>> {
        self.create_with(options, &RemoteDeviceFactory)
    }

    /// Build a device through any host factory.
    ///
    /// Fails with [`HalError::Configuration`] listing the catalog's names when
    /// the selected provider could not construct a backend.
    pub fn create_with<F: DeviceFactory<C>>(
        &self,
        options: DeviceOptions,
        factory: &F,
    ) -> HalResult<F::Device> {
        let resolution = self
            .configured_backend(&options.alice_backend, &options.api_token, &options.options)?
            .ok_or_else(|| HalError::unresolved_backend(self.local.backend_names().as_slice()))?;

        let backend = ConfiguredBackend::new(resolution.backend, resolution.origin, options.wires);
        factory.create(options.wires, backend, options.shots, options.seed)
    }
}
