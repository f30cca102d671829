// Application context.
// Explicitly constructed at startup and passed to the view; owns the tokio
// runtime and the posts store, with an explicit shutdown hook.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Handle, Runtime};

use crate::api::ApiClient;
use crate::error::Result;
use crate::store::PostStore;

/// Everything the view needs, constructed once in `main`.
///
/// There is no process-wide singleton: the context is passed down explicitly
/// and torn down with `shutdown` once the view has exited.
pub struct AppContext {
    store: Arc<PostStore>,
    runtime: Runtime,
}

impl AppContext {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = ApiClient::new(base_url)?;
        Ok(Self {
            store: PostStore::new(client),
            runtime: Runtime::new()?,
        })
    }

    pub fn store(&self) -> &Arc<PostStore> {
        &self.store
    }

    /// Handle for spawning operations onto the runtime.
    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Tear the runtime down, abandoning any still-outstanding requests.
    pub fn shutdown(self) {
        self.runtime.shutdown_timeout(Duration::from_millis(500));
    }
}
