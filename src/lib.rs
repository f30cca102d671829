// postdeck: TUI client for a local posts REST API.
// Lib target so integration tests can drive the client and store directly.

pub mod api;
pub mod app;
pub mod context;
pub mod error;
pub mod store;
pub mod ui;

pub use error::{PostdeckError, Result};
