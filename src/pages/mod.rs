//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Input checks live in plain
//! functions next to the component so they can be tested without a browser.

pub mod admin;
pub mod donation_request;
pub mod errors;
pub mod give_meal;
pub mod home;
pub mod login;
pub mod receive_meal;
