//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_admin_command;
mod course_catalogue_query;
mod course_repository;
mod enrollment_command;
mod enrollment_repository;
mod student_command;
mod student_query;
mod student_repository;

#[cfg(test)]
pub use course_admin_command::MockCourseAdminCommand;
pub use course_admin_command::CourseAdminCommand;
#[cfg(test)]
pub use course_catalogue_query::MockCourseCatalogueQuery;
pub use course_catalogue_query::CourseCatalogueQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::EnrollmentCommand;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::StudentCommand;
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
