//! Request handler module
//!
//! Responsible for request routing dispatch: the activity API, the root redirect,
//! health probes and the static front-end assets.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
