//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context providers set up in
//! [`crate::app::App`].

pub mod guarded;
pub mod nav_bar;
