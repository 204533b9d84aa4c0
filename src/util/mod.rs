//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, cookies,
//! the local clock) from page and component logic.

pub mod auth;
pub mod dates;
pub mod prefs;
pub mod storage;
