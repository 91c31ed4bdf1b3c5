//! Build an `alicebob.qubit` device over a toy emulator and run a circuit.
//!
//! The emulator here only splits shots between all-zeros and all-ones; a real
//! deployment plugs in the Alice & Bob emulator engine instead.
//!
//! ```text
//! RUST_LOG=debug cargo run --example cat_device
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hal_alicebob::{
    AliceBobDevice, ApiToken, Backend, BackendAvailability, BackendDescriptor, BackendOptions,
    Capabilities, Counts, DeviceOptions, ExecutionResult, HalError, HalResult, JobId, JobStatus,
    LocalProvider, Provider, RemoteClient, ValidationResult, catalog,
};
use tracing_subscriber::EnvFilter;

/// A circuit as the toy emulator sees it.
struct SimpleCircuit {
    num_qubits: u32,
    gates: Vec<String>,
}

/// In-memory emulator built for one catalog entry.
struct ToyEmulator {
    capabilities: Capabilities,
    jobs: Mutex<HashMap<String, (JobStatus, Option<ExecutionResult>)>>,
    next_id: Mutex<u64>,
}

impl ToyEmulator {
    fn new(descriptor: &BackendDescriptor, options: &BackendOptions) -> Self {
        let mut capabilities = descriptor.capabilities.clone();
        if let Some(noise) = &capabilities.noise_profile {
            capabilities.noise_profile = Some(noise.with_overrides(options));
        }
        Self {
            capabilities,
            jobs: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Backend<SimpleCircuit> for ToyEmulator {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &SimpleCircuit) -> HalResult<ValidationResult> {
        if circuit.num_qubits > self.capabilities.num_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "Circuit requires {} qubits, backend has {}",
                    circuit.num_qubits, self.capabilities.num_qubits
                )],
            });
        }

        for gate in &circuit.gates {
            if !self.capabilities.gate_set.contains(gate) {
                return Ok(ValidationResult::RequiresTranspilation {
                    details: format!("{gate} is not a bias-preserving gate"),
                });
            }
        }

        Ok(ValidationResult::Valid)
    }

    async fn submit(&self, circuit: &SimpleCircuit, shots: u32) -> HalResult<JobId> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("toy-{}", *next)
        };

        let mut counts = Counts::new();
        counts.insert("0".repeat(circuit.num_qubits as usize), (shots / 2).into());
        counts.insert("1".repeat(circuit.num_qubits as usize), (shots - shots / 2).into());
        let result = ExecutionResult::new(counts, shots).with_execution_time(1);

        self.jobs
            .lock()
            .unwrap()
            .insert(id.clone(), (JobStatus::Completed, Some(result)));

        Ok(JobId::new(id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs
            .lock()
            .unwrap()
            .get(&job_id.0)
            .map(|(s, _)| s.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.jobs
            .lock()
            .unwrap()
            .get(&job_id.0)
            .and_then(|(_, r)| r.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.get_mut(&job_id.0) {
            Some((status, _)) if !status.is_terminal() => {
                *status = JobStatus::Cancelled;
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(HalError::JobNotFound(job_id.0.clone())),
        }
    }
}

/// This demo has no network access.
struct Offline;

impl RemoteClient<SimpleCircuit> for Offline {
    fn connect(&self, _token: &ApiToken) -> HalResult<Arc<dyn Provider<SimpleCircuit>>> {
        Err(HalError::BackendUnavailable("remote provider is offline".into()))
    }
}

fn toy_factory(
    descriptor: &BackendDescriptor,
    options: &BackendOptions,
) -> HalResult<Arc<dyn Backend<SimpleCircuit>>> {
    Ok(Arc::new(ToyEmulator::new(descriptor, options)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hal_alicebob=info".parse()?))
        .init();

    let local = LocalProvider::with_catalog(catalog::alice_bob_targets(), toy_factory);
    let device = AliceBobDevice::<SimpleCircuit>::new(Arc::new(local), Arc::new(Offline));

    let options = DeviceOptions::new()
        .with_wires(3)
        .with_shots(500)
        .with_backend("EMU:6Q:PHYSICAL_CATS")
        .with_option("kappa_1", serde_json::json!(50.0));
    let qdev = device.create(options)?;

    let backend = qdev.backend();
    println!("Device:  {}", device.name());
    println!("Backend: {} ({})", backend.name(), backend.origin());
    println!("Wires:   {}", backend.configuration().n_qubits);
    if let Some(noise) = &backend.capabilities().noise_profile {
        println!("kappa_2/kappa_1: {:.0}", noise.kappa_ratio());
    }
    println!();

    let circuit = SimpleCircuit {
        num_qubits: 3,
        gates: vec!["x".into(), "cx".into(), "ccx".into()],
    };
    let result = qdev.execute(&circuit).await?;

    println!("Results:");
    for (bitstring, count) in result.counts.sorted() {
        println!("  {bitstring}: {count}");
    }

    // Unknown names fall back to the default emulator with a warning.
    let fallback = device.create(DeviceOptions::new().with_backend("QPU:1Q:UNLISTED"))?;
    println!("\nFallback backend: {}", fallback.backend().name());

    Ok(())
}
