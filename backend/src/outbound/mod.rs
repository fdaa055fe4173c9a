//! Outbound adapters implementing the repository ports.
//!
//! - **memory**: a mutex-guarded store used without a database and in tests.
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations.
//! They contain no business rules.

pub mod memory;
pub mod persistence;
