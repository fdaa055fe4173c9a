//! Driving port for read-only catalogue access.

use async_trait::async_trait;

use crate::domain::{CourseFilter, CourseId, CourseOverview, Error, SeatsRemaining};

/// Catalogue reads used by listing pages and seat indicators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogueQuery: Send + Sync {
    /// Courses matching `filter`, ordered by code.
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<CourseOverview>, Error>;

    /// A single course with its enrollment count.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the course does not exist.
    async fn get_course(&self, course_id: &CourseId) -> Result<CourseOverview, Error>;

    /// Number of students currently enrolled.
    async fn enrolled_count(&self, course_id: &CourseId) -> Result<u32, Error>;

    /// Open seats, or [`SeatsRemaining::Unlimited`] for capacity zero.
    async fn seats_remaining(&self, course_id: &CourseId) -> Result<SeatsRemaining, Error>;

    /// Distinct semester labels for filter menus.
    async fn list_semesters(&self) -> Result<Vec<String>, Error>;
}
