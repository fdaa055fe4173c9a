//! Enrollment records and the outcomes of enroll and drop requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Capacity, Course, CourseId, StudentId};

/// A student holding a seat in a course. At most one exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrolled student.
    pub student_id: StudentId,
    /// Course the seat belongs to.
    pub course_id: CourseId,
    /// When the seat was claimed.
    pub enrolled_at: DateTime<Utc>,
}

/// Result of an enroll request.
///
/// Only [`EnrollOutcome::Enrolled`] changes state. The other variants are
/// successful no-ops rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// A new enrollment was created.
    Enrolled(Enrollment),
    /// The student already held a seat; the existing record is returned.
    AlreadyEnrolled(Enrollment),
    /// Every seat is taken.
    CourseFull {
        /// Ceiling that was reached.
        capacity: Capacity,
    },
}

/// Result of a drop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    /// The enrollment was removed.
    Dropped,
    /// There was nothing to remove.
    NotEnrolled,
}

/// Result of an atomic seat claim performed by a store adapter.
///
/// Adapters run the existence checks, the duplicate check, the capacity check
/// and the insert as one unit and report which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatClaim {
    /// A new row was inserted.
    Claimed(Enrollment),
    /// A row for the pair already existed.
    Existing(Enrollment),
    /// The capacity check rejected the claim.
    Full {
        /// Ceiling of the course.
        capacity: Capacity,
        /// Count observed under the lock.
        enrolled: u32,
    },
    /// The course does not exist.
    CourseMissing,
    /// The student does not exist.
    StudentMissing,
}

/// A course on a student's schedule, newest enrollment first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    /// The course record.
    pub course: Course,
    /// When the student enrolled.
    pub enrolled_at: DateTime<Utc>,
}
