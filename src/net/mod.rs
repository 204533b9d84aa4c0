//! Networking modules for the lunch-order HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the REST calls, `auth` defines the narrow seams the session
//! store and admin gate depend on, `error` is the shared failure taxonomy, and
//! `types` defines the wire schema.

pub mod api;
pub mod auth;
pub mod error;
pub mod types;
