// Posts API module.
// Provides the HTTP client and types for the posts REST resource.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use types::{NewPost, Post};
