//! Error types for backend resolution, device construction and execution.
//!
//! Errors are categorized by recoverability:
//!
//! | Category | Variants | Recovery |
//! |----------|----------|----------|
//! | **Transient** | `BackendUnavailable`, `Timeout` | Retry with backoff |
//! | **Permanent** | `InvalidCircuit`, `CircuitTooLarge`, `InvalidShots`, `Unsupported` | Fix input |
//! | **Job-level** | `JobFailed`, `JobCancelled`, `JobNotFound` | Resubmit or abort |
//! | **Auth** | `AuthenticationFailed` | Check the API token |
//! | **Config** | `Configuration`, `Backend` | Fix device options |
//!
//! An unknown backend name is *not* an error: the resolver falls back to the
//! local default and logs a warning. `Configuration` is raised when a device
//! is asked for zero wires, when a local provider is given a default it does
//! not register, and when a provider returns no handle for a backend it was
//! asked to build.

use thiserror::Error;

/// Errors raised by the Alice & Bob adapter and the backends it wraps.
///
/// Providers may wrap their own failures in the `Backend` variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    // ── Transient errors (retry with backoff) ────────────────────────
    /// The provider or backend cannot be reached right now.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Polling gave up before the job finished.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    // ── Permanent errors (fix input) ─────────────────────────────────
    /// The backend rejected the circuit in `validate`.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Requested wires exceed what the configured backend exposes.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Shot count the device or backend cannot run.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// The circuit needs gates the backend does not run natively.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    // ── Job-level errors ─────────────────────────────────────────────
    /// The backend reported the job as failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled before it finished.
    #[error("Job cancelled")]
    JobCancelled,

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    // ── Auth errors ──────────────────────────────────────────────────
    /// The remote provider rejected the API token.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    // ── Config errors ────────────────────────────────────────────────
    /// Device configuration error (fix the options passed to the device).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl HalError {
    /// Returns `true` if this error is transient and the operation may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_) | Self::Timeout(_))
    }

    /// Build the error raised when no backend handle could be produced.
    ///
    /// The message enumerates the valid names so the caller can pick one.
    pub fn unresolved_backend<S: AsRef<str>>(valid_names: &[S]) -> Self {
        let names: Vec<&str> = valid_names.iter().map(AsRef::as_ref).collect();
        Self::Configuration(format!(
            "Backend error, please choose one of the following: {}",
            names.join(" ")
        ))
    }
}

/// Result type for adapter operations.
pub type HalResult<T> = Result<T, HalError>;
