//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns who the visitor is; `admin_gate` owns the optional shared
//! admin password. Both persist through [`crate::util::storage`] and are
//! created once in [`crate::app::App`].

pub mod admin_gate;
pub mod session;
