//! Core SEOGEN library (API clients, credential store, notifications, config).

pub mod api;
pub mod config;
pub mod credentials;
pub mod notify;
