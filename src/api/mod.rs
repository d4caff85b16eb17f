//! Read-only Jenkins API services.
//!
//! The SDK surface is exposed via service accessors on clients:
//! - `Client::jobs()` / `BlockingClient::jobs()`
//! - `Client::views()` / `BlockingClient::views()`

pub mod jobs;
pub mod views;

pub use jobs::*;
pub use views::*;
