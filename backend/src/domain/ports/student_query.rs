//! Driving port for student registry reads.

use async_trait::async_trait;

use crate::domain::{EnrolledCourse, Error, Student, StudentId};

/// Student registry reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Fetch an account.
    async fn get_student(&self, student_id: &StudentId) -> Result<Student, Error>;

    /// The student's schedule, newest enrollment first.
    async fn enrolled_courses(&self, student_id: &StudentId) -> Result<Vec<EnrolledCourse>, Error>;
}
