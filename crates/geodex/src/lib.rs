//! Geodex App Services
//!
//! Country catalog, favorites, persistence, notifications, and networking.
//! Frontends (CLI, GUI) construct the stores with injected storage and
//! notification sinks and call into them directly.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod notify;
pub mod providers;
