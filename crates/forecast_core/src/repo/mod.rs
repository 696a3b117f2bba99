//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the forecast data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The repository is the only component that issues SQL against forecast rows.
//! - "No such row" is `Ok(None)`; errors are reserved for storage failures.

pub mod forecast_repo;
