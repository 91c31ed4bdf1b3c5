//! Backend resolution: pick a local or remote backend for a requested name.
//!
//! The local catalog is authoritative for which names exist. A name is
//! matched by exact, case-sensitive comparison after trimming whitespace on
//! both sides, and the first matching entry wins. A matched name is built by
//! the remote client when the API token requests remote access, otherwise by
//! the local provider. An unknown name is not an error: a warning is logged
//! and the local provider's default backend is returned instead.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{Backend, BackendOptions};
use crate::configured::BackendOrigin;
use crate::error::HalResult;
use crate::provider::{ApiToken, Provider, RemoteClient};

/// A backend handle and the path that produced it.
pub struct Resolution<C> {
    pub backend: Arc<dyn Backend<C>>,
    pub origin: BackendOrigin,
}

impl<C> std::fmt::Debug for Resolution<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("backend", &self.backend.name())
            .field("origin", &self.origin)
            .finish()
    }
}

/// Resolve `requested` to a backend handle.
///
/// `options` reach the provider constructor verbatim on every path. Errors
/// from the providers propagate; `Ok(None)` means the selected provider
/// could not construct the backend it was asked for.
pub fn resolve<C>(
    requested: &str,
    token: &ApiToken,
    options: &BackendOptions,
    local: &dyn Provider<C>,
    remote: &dyn RemoteClient<C>,
) -> HalResult<Option<Resolution<C>>> {
    let wanted = requested.trim();
    let matched = local
        .backends()
        .into_iter()
        .find(|descriptor| descriptor.name.trim() == wanted);

    let Some(descriptor) = matched else {
        warn!(
            backend = requested,
            "Backend '{requested}' not found. Using default local backend."
        );
        return Ok(local
            .default_backend(options)?
            .map(|backend| Resolution {
                backend,
                origin: BackendOrigin::Fallback,
            }));
    };

    info!(
        backend = %descriptor.name,
        remote = token.requests_remote(),
        "Using alice & bob {} backend...",
        descriptor.name
    );

    let resolution = if token.requests_remote() {
        remote
            .connect(token)?
            .get_backend(&descriptor.name, options)?
            .map(|backend| Resolution {
                backend,
                origin: BackendOrigin::Remote,
            })
    } else {
        local
            .get_backend(&descriptor.name, options)?
            .map(|backend| Resolution {
                backend,
                origin: BackendOrigin::Local,
            })
    };

    Ok(resolution)
}
