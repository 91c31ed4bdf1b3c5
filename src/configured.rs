//! Configuration overlay attached to a resolved backend.
//!
//! Provider backends do not expose the qubit count the device was asked
//! for. [`ConfiguredBackend`] wraps the handle with a [`DeviceConfiguration`]
//! so the generic device can read `configuration().n_qubits` from one place,
//! whatever provider produced the handle.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::{Backend, BackendAvailability, ValidationResult};
use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// The qubit count requested for one device construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfiguration {
    pub n_qubits: u32,
}

/// Which path of the resolver produced a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendOrigin {
    /// Matched in the local catalog, built by the local provider.
    Local,
    /// Matched in the local catalog, built by the remote client.
    Remote,
    /// Unknown name; the local provider's default was used.
    Fallback,
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendOrigin::Local => f.write_str("local"),
            BackendOrigin::Remote => f.write_str("remote"),
            BackendOrigin::Fallback => f.write_str("fallback"),
        }
    }
}

/// A provider backend plus the device's configuration overlay.
///
/// Every lifecycle call is delegated to the wrapped handle.
pub struct ConfiguredBackend<C> {
    inner: Arc<dyn Backend<C>>,
    configuration: DeviceConfiguration,
    origin: BackendOrigin,
}

impl<C> ConfiguredBackend<C> {
    pub fn new(inner: Arc<dyn Backend<C>>, origin: BackendOrigin, n_qubits: u32) -> Self {
        Self {
            inner,
            configuration: DeviceConfiguration { n_qubits },
            origin,
        }
    }

    pub fn configuration(&self) -> DeviceConfiguration {
        self.configuration
    }

    pub fn origin(&self) -> BackendOrigin {
        self.origin
    }

    /// The provider's handle, without the overlay.
    pub fn inner(&self) -> &Arc<dyn Backend<C>> {
        &self.inner
    }
}

impl<C> fmt::Debug for ConfiguredBackend<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredBackend")
            .field("name", &self.inner.name())
            .field("configuration", &self.configuration)
            .field("origin", &self.origin)
            .finish()
    }
}

#[async_trait]
impl<C: Sync> Backend<C> for ConfiguredBackend<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn capabilities(&self) -> &Capabilities {
        self.inner.capabilities()
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        self.inner.availability().await
    }

    async fn validate(&self, circuit: &C) -> HalResult<ValidationResult> {
        self.inner.validate(circuit).await
    }

    async fn submit(&self, circuit: &C, shots: u32) -> HalResult<JobId> {
        self.inner.submit(circuit, shots).await
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.inner.status(job_id).await
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.inner.result(job_id).await
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.inner.cancel(job_id).await
    }

    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.inner.wait(job_id).await
    }
}
