//! The backend handle seam.
//!
//! A backend handle is whatever a provider hands back for a catalog name: a
//! local emulator or a remote hardware queue. The adapter only reads its
//! [`Backend::name`]; the generic device drives the rest of the lifecycle:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! The trait is generic over the circuit type `C` so the adapter stays
//! independent of any circuit IR.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Keyword options forwarded verbatim to a provider's backend constructor
/// (`kappa_1`, `kappa_2`, `average_nb_photons`, ...).
pub type BackendOptions = serde_json::Map<String, serde_json::Value>;

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const MAX_POLLS: u32 = 600;

/// A quantum backend obtained from a provider.
///
/// `capabilities()` is synchronous and infallible: implementations cache
/// them at construction time. `submit()` returns a job in `Queued` state and
/// `result()` is only meaningful once `status()` reports `Completed`.
#[async_trait]
pub trait Backend<C>: Send + Sync {
    /// Name under which the provider catalog lists this backend.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    /// Lightweight liveness check with queue information.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Check a circuit against the backend's constraints.
    async fn validate(&self, circuit: &C) -> HalResult<ValidationResult>;

    async fn submit(&self, circuit: &C, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll until the job reaches a terminal state (500ms interval, 5 minutes max).
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        for _ in 0..MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Queue information reported by [`Backend::availability`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendAvailability {
    pub is_available: bool,
    /// Jobs ahead in the queue, if the backend reports it.
    pub queue_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Local emulators never queue.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Can be submitted as-is.
    Valid,
    Invalid { reasons: Vec<String> },
    /// Could run after the host compiles it to the backend's gate set.
    RequiresTranspilation { details: String },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}
