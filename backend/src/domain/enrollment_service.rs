//! Enrollment manager.
//!
//! Implements [`EnrollmentCommand`] on top of an injected
//! [`EnrollmentRepository`]. The repository performs the check-then-insert
//! atomically; this service turns the branch it took into an outcome and
//! absorbs store-level duplicate rejections so callers never see them.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{EnrollmentCommand, EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{CourseId, DropOutcome, EnrollOutcome, Error, SeatClaim, StudentId};

/// Upper bound on claim attempts when a duplicate-key race loses its row.
const MAX_CLAIM_ATTEMPTS: usize = 2;

/// Enrollment manager implementing the [`EnrollmentCommand`] driving port.
#[derive(Clone)]
pub struct EnrollmentService<E> {
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<E> EnrollmentService<E> {
    /// Create a service over the given store and clock.
    pub fn new(enrollments: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self { enrollments, clock }
    }
}

impl<E> EnrollmentService<E>
where
    E: EnrollmentRepository,
{
    fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
        match error {
            EnrollmentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
            }
            EnrollmentRepositoryError::Query { message }
            | EnrollmentRepositoryError::DuplicateEnrollment { message } => {
                Error::internal(format!("enrollment repository error: {message}"))
            }
            EnrollmentRepositoryError::MissingReference { message } => {
                Error::not_found(format!("student or course no longer exists: {message}"))
            }
        }
    }

    fn outcome_for(
        claim: SeatClaim,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, Error> {
        match claim {
            SeatClaim::Claimed(enrollment) => {
                info!(%student_id, %course_id, "student enrolled");
                Ok(EnrollOutcome::Enrolled(enrollment))
            }
            SeatClaim::Existing(enrollment) => Ok(EnrollOutcome::AlreadyEnrolled(enrollment)),
            SeatClaim::Full { capacity, enrolled } => {
                warn!(
                    %student_id,
                    %course_id,
                    %capacity,
                    enrolled,
                    "enrollment rejected: course full"
                );
                Ok(EnrollOutcome::CourseFull { capacity })
            }
            SeatClaim::CourseMissing => {
                Err(Error::not_found(format!("course {course_id} not found")))
            }
            SeatClaim::StudentMissing => {
                Err(Error::not_found(format!("student {student_id} not found")))
            }
        }
    }

    /// Resolve a duplicate-key rejection into the row that won the race.
    async fn existing_after_duplicate(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<EnrollOutcome>, Error> {
        warn!(%student_id, %course_id, "duplicate enrollment rejected by store; re-reading");
        Ok(self
            .enrollments
            .find(student_id, course_id)
            .await
            .map_err(Self::map_enrollment_error)?
            .map(EnrollOutcome::AlreadyEnrolled))
    }
}

#[async_trait]
impl<E> EnrollmentCommand for EnrollmentService<E>
where
    E: EnrollmentRepository,
{
    async fn enroll(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<EnrollOutcome, Error> {
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let claim = self
                .enrollments
                .claim_seat(student_id, course_id, self.clock.utc())
                .await;
            match claim {
                Ok(claim) => return Self::outcome_for(claim, student_id, course_id),
                Err(EnrollmentRepositoryError::DuplicateEnrollment { .. }) => {
                    if let Some(outcome) =
                        self.existing_after_duplicate(student_id, course_id).await?
                    {
                        return Ok(outcome);
                    }
                    // The winning row was dropped before we could read it.
                }
                Err(err) => return Err(Self::map_enrollment_error(err)),
            }
        }
        Err(Error::conflict(
            "enrollment changed concurrently; retry the request",
        ))
    }

    async fn drop_enrollment(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<DropOutcome, Error> {
        let removed = self
            .enrollments
            .release_seat(student_id, course_id)
            .await
            .map_err(Self::map_enrollment_error)?;
        if removed {
            info!(%student_id, %course_id, "student dropped course");
            Ok(DropOutcome::Dropped)
        } else {
            Ok(DropOutcome::NotEnrolled)
        }
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
