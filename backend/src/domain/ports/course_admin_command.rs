//! Driving port for staff-only course management.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error, StudentId};

/// Course mutations. Every call names the acting account, which must be staff.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseAdminCommand: Send + Sync {
    /// Create a course.
    ///
    /// # Errors
    ///
    /// `unauthorized` for an unknown actor, `forbidden` for non-staff and
    /// `conflict` when the code is already taken.
    async fn create_course(&self, actor: &StudentId, draft: CourseDraft) -> Result<Course, Error>;

    /// Replace a course's editable fields.
    ///
    /// Lowering capacity below the current count keeps existing enrollments.
    async fn update_course(
        &self,
        actor: &StudentId,
        course_id: &CourseId,
        draft: CourseDraft,
    ) -> Result<Course, Error>;

    /// Delete a course together with its enrollments.
    async fn delete_course(&self, actor: &StudentId, course_id: &CourseId) -> Result<(), Error>;
}
