//! Driving port for enroll and drop requests.

use async_trait::async_trait;

use crate::domain::{CourseId, DropOutcome, EnrollOutcome, Error, StudentId};

/// Driving port consumed by inbound adapters to change enrollments.
///
/// Both operations are idempotent. Repeating an enroll reports
/// [`EnrollOutcome::AlreadyEnrolled`] and repeating a drop reports
/// [`DropOutcome::NotEnrolled`]; neither is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Claim a seat for the student.
    ///
    /// # Errors
    ///
    /// Returns a `not_found` error when the student or course does not exist,
    /// or a `service_unavailable`/`internal_error` error on store failure.
    async fn enroll(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, Error>;

    /// Give the student's seat back.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store fails.
    async fn drop_enrollment(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<DropOutcome, Error>;
}
