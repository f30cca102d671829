// Posts store.
// Owns the cache slice, serializes writes through one dispatch point, and
// publishes cache-state transitions to subscribed listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::api::{ApiClient, NewPost, Post};
use crate::error::Result;

use super::query::QueryState;

/// Snapshot of the posts cache.
///
/// `stale` is set by any successful mutation and cleared by the next
/// successful reload; mutations never refetch on their own.
#[derive(Debug, Clone, Default)]
pub struct CacheSlice {
    pub query: QueryState<Vec<Post>>,
    pub stale: bool,
}

type Listener = Box<dyn Fn(&CacheSlice) + Send + Sync>;

/// Store for the posts resource.
///
/// Holds the cache slice for `list` results and exposes the four resource
/// operations. All writes to the slice go through a single dispatch point,
/// which notifies every subscribed listener with a fresh snapshot after the
/// write lands.
pub struct PostStore {
    client: ApiClient,
    slice: Mutex<CacheSlice>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

impl PostStore {
    pub fn new(client: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            client,
            slice: Mutex::new(CacheSlice::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
        })
    }

    /// Base URL of the backend this store talks to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Current state of the cache slice.
    pub fn snapshot(&self) -> CacheSlice {
        self.slice
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a listener for cache-state transitions.
    ///
    /// The listener is called with a snapshot after every write to the slice,
    /// and unregistered when the returned `Subscription` is dropped.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(&CacheSlice) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(self),
        }
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Apply a write to the cache slice, then notify listeners.
    ///
    /// The slice lock is released before listeners run, so a listener may
    /// call back into `snapshot` without deadlocking.
    fn dispatch(&self, apply: impl FnOnce(&mut CacheSlice)) {
        let snapshot = {
            let mut slice = self.slice.lock().unwrap_or_else(PoisonError::into_inner);
            apply(&mut slice);
            slice.clone()
        };
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in listeners.iter() {
            listener(&snapshot);
        }
    }

    /// Fetch the posts list and settle the cache slice.
    ///
    /// Transitions through `Loading` on the first request and `Refetching`
    /// afterwards, then `Success` or `Error`. A successful reload clears the
    /// stale flag.
    pub async fn reload(&self) -> Result<()> {
        self.dispatch(|slice| {
            slice.query = std::mem::take(&mut slice.query).begin_fetch();
        });

        match self.client.list_posts().await {
            Ok(posts) => {
                self.dispatch(|slice| {
                    slice.query = QueryState::Success(posts);
                    slice.stale = false;
                });
                Ok(())
            }
            Err(err) => {
                self.dispatch(|slice| {
                    slice.query = QueryState::Error(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Create a post. One round trip; on success the cached list is marked
    /// stale but not refetched.
    pub async fn create(&self, post: NewPost) -> Result<Post> {
        let created = self.client.create_post(&post).await?;
        self.dispatch(|slice| slice.stale = true);
        Ok(created)
    }

    /// Replace an existing post in full. Requires the id to exist server-side.
    pub async fn update(&self, post: Post) -> Result<Post> {
        let updated = self.client.update_post(&post).await?;
        self.dispatch(|slice| slice.stale = true);
        Ok(updated)
    }

    /// Delete a post by id. A repeated delete surfaces the backend's error.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client.delete_post(id).await?;
        self.dispatch(|slice| slice.stale = true);
        Ok(())
    }
}

/// Guard for a registered listener. Dropping it unregisters the listener.
pub struct Subscription {
    id: u64,
    store: Weak<PostStore>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unsubscribe(self.id);
        }
    }
}
