//! Port for enrollment persistence.
//!
//! The central operation is [`EnrollmentRepository::claim_seat`]. Adapters
//! must perform the existence checks, the duplicate check, the capacity check
//! and the insert as one atomic unit so concurrent claims for the last seat
//! cannot both succeed. The store must also enforce uniqueness of the
//! (student, course) pair; a rejected insert surfaces as
//! [`EnrollmentRepositoryError::DuplicateEnrollment`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CourseId, EnrolledCourse, Enrollment, SeatClaim, StudentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
        /// The store's uniqueness constraint rejected a second row for a pair.
        DuplicateEnrollment { message: String } =>
            "enrollment already exists: {message}",
        /// A referenced student or course vanished mid-operation.
        MissingReference { message: String } =>
            "enrollment references a missing record: {message}",
    }
}

/// Port for enrollment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Atomically claim a seat for `student_id` in `course_id`.
    async fn claim_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<SeatClaim, EnrollmentRepositoryError>;

    /// Remove the enrollment for the pair. Returns `false` if none existed.
    async fn release_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// Fetch the enrollment for the pair, if any.
    async fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Courses the student holds a seat in, newest enrollment first.
    async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<EnrolledCourse>, EnrollmentRepositoryError>;
}
