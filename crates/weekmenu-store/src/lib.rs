//! Weekly menu data model and the append-only recording log.

pub mod config;
pub mod lock;
pub mod log;
pub mod models;
