//! Domain primitives, ports, and services.
//!
//! Purpose: model courses, students, and enrollments with validated types,
//! and implement the enrollment manager plus its catalogue, registry, and
//! seeding companions over the repository ports. Nothing here knows about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Course, Student, Enrollment and their value types.
//! - EnrollmentService, CourseService, StudentService: driving port
//!   implementations.
//! - CatalogueSeeder: idempotent default catalogue loader.

mod actor;
pub mod catalogue_seed;
pub mod course;
pub mod course_service;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;

pub use self::catalogue_seed::{
    CatalogueSeed, CatalogueSeeder, SeedAccount, SeedCourse, SeedReport,
};
pub use self::course::{
    COURSE_CODE_MAX, COURSE_NUMBER_MAX, COURSE_TITLE_MAX, Capacity, Course, CourseCode,
    CourseDraft, CourseFields, CourseFilter, CourseId, CourseOverview, CourseValidationError,
    SEMESTER_MAX, SeatsRemaining,
};
pub use self::course_service::CourseService;
pub use self::enrollment::{DropOutcome, EnrollOutcome, EnrolledCourse, Enrollment, SeatClaim};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::student::{
    EMAIL_MAX, Student, StudentId, StudentRegistration, StudentValidationError, USERNAME_MAX,
    USERNAME_MIN, Username,
};
pub use self::student_service::StudentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use course_enrollment::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
