//! Core use-case services.
//!
//! # Responsibility
//! - Expose repository operations as use-case level APIs.
//! - Keep HTTP callers decoupled from storage details.

pub mod forecast_service;
