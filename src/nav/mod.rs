//! Client-side routing rules.
//!
//! ARCHITECTURE
//! ============
//! `routes` is the static table of paths and access requirements; `guard`
//! turns a route plus the current session into allow/redirect. Neither module
//! depends on Leptos, so both are tested natively.

pub mod guard;
pub mod routes;
