//! Activities server
//!
//! A small HTTP service over an in-memory set of school activities: list them,
//! sign a student up by email, and remove a student again.

pub mod api;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
