//! Request middleware.
//!
//! Purpose: request correlation. Every request runs inside a trace id scope
//! that errors and log events pick up.

pub mod trace;

pub use trace::Trace;
