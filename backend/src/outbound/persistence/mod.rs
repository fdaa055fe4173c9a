//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types. Capacity rules stay in the domain.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) are
//!   internal and never reach the domain layer.
//! - Database errors are classified once (`error_mapping.rs`) and mapped into
//!   each port's error type.
//!
//! # Example
//!
//! ```ignore
//! use course_enrollment::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campus")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_student_repository;
mod error_mapping;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrate::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
