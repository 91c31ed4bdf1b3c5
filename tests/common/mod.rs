//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hal_alicebob::{
    AliceBobDevice, ApiToken, Backend, BackendAvailability, BackendDescriptor, BackendOptions,
    Capabilities, Counts, ExecutionResult, HalError, HalResult, JobId, JobStatus, LocalProvider,
    Provider, RemoteClient, ValidationResult, catalog,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Token the remote double refuses.
pub const REJECTED_TOKEN: &str = "rejected-token";

/// Minimal circuit: a qubit count and gate names.
#[derive(Debug, Clone)]
pub struct MockCircuit {
    pub num_qubits: u32,
    pub gates: Vec<String>,
}

impl MockCircuit {
    pub fn new(num_qubits: u32, gates: &[&str]) -> Self {
        Self {
            num_qubits,
            gates: gates.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Emulator double that completes every job instantly with a 50/50 split.
pub struct MockCatBackend {
    capabilities: Capabilities,
    pub options: BackendOptions,
    jobs: Mutex<HashMap<String, ExecutionResult>>,
    next_id: Mutex<u64>,
}

impl MockCatBackend {
    pub fn new(descriptor: &BackendDescriptor, options: &BackendOptions) -> Self {
        Self {
            capabilities: descriptor.capabilities.clone(),
            options: options.clone(),
            jobs: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Backend<MockCircuit> for MockCatBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &MockCircuit) -> HalResult<ValidationResult> {
        if circuit.num_qubits > self.capabilities.num_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "circuit uses {} qubits, backend has {}",
                    circuit.num_qubits, self.capabilities.num_qubits
                )],
            });
        }
        if let Some(gate) = circuit
            .gates
            .iter()
            .find(|g| !self.capabilities.gate_set.contains(g))
        {
            return Ok(ValidationResult::RequiresTranspilation {
                details: format!("gate '{gate}' must be decomposed"),
            });
        }
        Ok(ValidationResult::Valid)
    }

    async fn submit(&self, circuit: &MockCircuit, shots: u32) -> HalResult<JobId> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("{}-{}", self.capabilities.name, *next)
        };

        let width = circuit.num_qubits as usize;
        let counts = Counts::from_pairs([
            ("0".repeat(width), u64::from(shots / 2)),
            ("1".repeat(width), u64::from(shots - shots / 2)),
        ]);
        self.jobs
            .lock()
            .unwrap()
            .insert(id.clone(), ExecutionResult::new(counts, shots));

        Ok(JobId::new(id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        if self.jobs.lock().unwrap().contains_key(&job_id.0) {
            Ok(JobStatus::Completed)
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.jobs
            .lock()
            .unwrap()
            .get(&job_id.0)
            .cloned()
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
        Ok(())
    }
}

/// Every `(backend name, options)` pair a provider was asked to build.
pub type CallLog = Arc<Mutex<Vec<(String, BackendOptions)>>>;

/// Local provider over the built-in catalog, recording construction calls.
pub fn recording_local(calls: CallLog) -> LocalProvider<MockCircuit> {
    LocalProvider::with_catalog(
        catalog::alice_bob_targets(),
        move |descriptor: &BackendDescriptor,
              options: &BackendOptions|
              -> HalResult<Arc<dyn Backend<MockCircuit>>> {
            calls
                .lock()
                .unwrap()
                .push((descriptor.name.clone(), options.clone()));
            Ok(Arc::new(MockCatBackend::new(descriptor, options)))
        },
    )
}

/// Remote client double recording tokens and construction calls.
#[derive(Default)]
pub struct RecordingRemote {
    pub tokens: Mutex<Vec<String>>,
    pub calls: CallLog,
}

impl RemoteClient<MockCircuit> for RecordingRemote {
    fn connect(&self, token: &ApiToken) -> HalResult<Arc<dyn Provider<MockCircuit>>> {
        self.tokens.lock().unwrap().push(token.expose().to_string());
        if token.expose() == REJECTED_TOKEN {
            return Err(HalError::AuthenticationFailed("invalid API key".into()));
        }
        Ok(Arc::new(recording_local(self.calls.clone())))
    }
}

/// Provider that lists the whole catalog but can build nothing.
pub struct ListingOnly(pub LocalProvider<MockCircuit>);

impl Provider<MockCircuit> for ListingOnly {
    fn name(&self) -> &str {
        "listing-only"
    }

    fn backends(&self) -> Vec<BackendDescriptor> {
        catalog::alice_bob_targets()
    }

    fn get_backend(
        &self,
        name: &str,
        options: &BackendOptions,
    ) -> HalResult<Option<Arc<dyn Backend<MockCircuit>>>> {
        self.0.get_backend(name, options)
    }

    fn default_backend(
        &self,
        options: &BackendOptions,
    ) -> HalResult<Option<Arc<dyn Backend<MockCircuit>>>> {
        self.0.default_backend(options)
    }
}

/// A device wired to recording doubles.
pub struct Harness {
    pub local_calls: CallLog,
    pub remote: Arc<RecordingRemote>,
    pub device: AliceBobDevice<MockCircuit>,
}

impl Harness {
    pub fn new() -> Self {
        let local_calls = CallLog::default();
        let remote = Arc::new(RecordingRemote::default());
        let device = AliceBobDevice::<MockCircuit>::new(
            Arc::new(recording_local(local_calls.clone())),
            remote.clone(),
        );
        Self {
            local_calls,
            remote,
            device,
        }
    }

    pub fn local_names(&self) -> Vec<String> {
        self.local_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn remote_names(&self) -> Vec<String> {
        self.remote
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Collects the level and message of every event emitted while capturing.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<(Level, String)>>>);

impl EventLog {
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::WARN)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::INFO)
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
