//! Alice & Bob device adapter for the HAL Contract.
//!
//! This crate lets a host framework run circuits on Alice & Bob cat-qubit
//! backends. Given a backend name, an optional API token and keyword options,
//! [`AliceBobDevice`] looks the name up in the local catalog, obtains the
//! backend from the local provider or the remote client, attaches a
//! [`DeviceConfiguration`] overlay with the requested wire count, and returns
//! a device built by the host's generic [`DeviceFactory`].
//!
//! # Overview
//!
//! - [`Provider`] / [`LocalProvider`] / [`RemoteClient`]: where backends come from
//! - [`resolve`]: name → backend handle, falling back to the local default
//! - [`ConfiguredBackend`]: handle plus the qubit-count overlay
//! - [`RemoteDevice`]: the generic device that runs circuits on it
//! - [`Backend`]: the handle's lifecycle, generic over the circuit type
//!
//! # Resolution
//!
//! ```text
//!   name in local catalog? ──no──→ warn! ──→ local default backend
//!          │ yes
//!          ├── token.len() > 1 ──→ remote client
//!          └── otherwise ────────→ local provider
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hal_alicebob::{AliceBobDevice, DeviceOptions, LocalProvider, catalog};
//!
//! let local = LocalProvider::with_catalog(catalog::alice_bob_targets(), my_emulator_factory);
//! let device = AliceBobDevice::new(Arc::new(local), Arc::new(my_remote_client));
//!
//! let qdev = device.create(DeviceOptions::new().with_wires(3).with_shots(500))?;
//! let result = qdev.execute(&circuit).await?;
//! ```
//!
//! Circuit execution, noise modeling and network transport belong to the
//! backends the providers build; this crate never implements them.

pub mod backend;
pub mod capability;
pub mod catalog;
pub mod configured;
pub mod device;
pub mod error;
pub mod job;
pub mod provider;
pub mod remote_device;
pub mod resolver;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendOptions, ValidationResult};
pub use capability::{Capabilities, GateSet, NoiseProfile, Topology, TopologyKind};
pub use configured::{BackendOrigin, ConfiguredBackend, DeviceConfiguration};
pub use device::{AliceBobDevice, DEVICE_NAME, DeviceOptions, SeedSource};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use provider::{ApiToken, BackendDescriptor, LocalProvider, Provider, RemoteClient};
pub use remote_device::{DeviceFactory, RemoteDevice, RemoteDeviceFactory};
pub use resolver::{Resolution, resolve};
pub use result::{Counts, ExecutionResult};
