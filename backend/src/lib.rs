//! Course enrollment backend library modules.
//!
//! Hexagonal layout: `domain` holds the enrollment manager and its companion
//! services behind ports, `inbound` adapts HTTP onto the driving ports, and
//! `outbound` implements the repository ports for PostgreSQL and memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
