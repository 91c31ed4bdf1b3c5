//! The host framework's generic remote-backend device.
//!
//! A [`RemoteDevice`] runs circuits on any configured backend through the
//! backend lifecycle (`validate` → `submit` → `wait`). It knows nothing about
//! Alice & Bob: the adapter only decides which backend it wraps.

use std::fmt;

use serde_json::json;
use tracing::debug;

use crate::backend::{Backend, ValidationResult};
use crate::configured::ConfiguredBackend;
use crate::device::SeedSource;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Builds a framework device from a configured backend.
pub trait DeviceFactory<C> {
    type Device;

    fn create(
        &self,
        wires: u32,
        backend: ConfiguredBackend<C>,
        shots: u32,
        seed: SeedSource,
    ) -> HalResult<Self::Device>;
}

/// Default factory producing [`RemoteDevice`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteDeviceFactory;

impl<C: Sync> DeviceFactory<C> for RemoteDeviceFactory {
    type Device = RemoteDevice<C>;

    fn create(
        &self,
        wires: u32,
        backend: ConfiguredBackend<C>,
        shots: u32,
        seed: SeedSource,
    ) -> HalResult<RemoteDevice<C>> {
        RemoteDevice::new(wires, backend, shots, seed)
    }
}

/// A device executing circuits on a configured backend.
pub struct RemoteDevice<C> {
    wires: u32,
    shots: u32,
    seed: SeedSource,
    backend: ConfiguredBackend<C>,
}

impl<C> fmt::Debug for RemoteDevice<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteDevice")
            .field("wires", &self.wires)
            .field("shots", &self.shots)
            .field("seed", &self.seed)
            .field("backend", &self.backend)
            .finish()
    }
}

impl<C: Sync> RemoteDevice<C> {
    /// Build the device over `backend`.
    ///
    /// The qubit count is read from the backend's configuration overlay. Shot
    /// limits are left to the backend's `validate` and `submit`.
    pub fn new(
        wires: u32,
        backend: ConfiguredBackend<C>,
        shots: u32,
        seed: SeedSource,
    ) -> HalResult<Self> {
        if wires == 0 {
            return Err(HalError::Configuration(
                "a device needs at least one wire".into(),
            ));
        }

        if shots == 0 {
            return Err(HalError::InvalidShots("a device needs at least one shot".into()));
        }

        let n_qubits = backend.configuration().n_qubits;
        if wires > n_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "{wires} wires requested, backend '{}' is configured for {n_qubits}",
                backend.name()
            )));
        }

        debug!(
            backend = backend.name(),
            origin = %backend.origin(),
            wires,
            shots,
            "Created remote device"
        );

        Ok(Self {
            wires,
            shots,
            seed,
            backend,
        })
    }

    pub fn wires(&self) -> u32 {
        self.wires
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn seed(&self) -> SeedSource {
        self.seed
    }

    pub fn backend(&self) -> &ConfiguredBackend<C> {
        &self.backend
    }

    /// Run one circuit for the device's shot count.
    pub async fn execute(&self, circuit: &C) -> HalResult<ExecutionResult> {
        match self.backend.validate(circuit).await? {
            ValidationResult::Valid => {}
            ValidationResult::Invalid { reasons } => {
                return Err(HalError::InvalidCircuit(reasons.join("; ")));
            }
            ValidationResult::RequiresTranspilation { details } => {
                return Err(HalError::Unsupported(details));
            }
        }

        let job_id = self.backend.submit(circuit, self.shots).await?;
        debug!(job = %job_id, backend = self.backend.name(), "Submitted circuit");

        let result = self.backend.wait(&job_id).await?;
        Ok(result.with_metadata(json!({
            "backend": self.backend.name(),
            "origin": self.backend.origin(),
            "job_id": job_id,
        })))
    }

    /// Run circuits one after another, stopping at the first failure.
    pub async fn batch_execute(&self, circuits: &[C]) -> HalResult<Vec<ExecutionResult>> {
        let mut results = Vec::with_capacity(circuits.len());
        for circuit in circuits {
            results.push(self.execute(circuit).await?);
        }
        Ok(results)
    }
}
