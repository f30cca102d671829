// Store module.
// Holds the posts cache slice, its query state machine, and the pub/sub surface.

pub mod posts;
pub mod query;

pub use posts::{CacheSlice, PostStore, Subscription};
pub use query::QueryState;
