//! Port for course catalogue persistence.
//!
//! Adapters store [`Course`] records and answer catalogue reads together with
//! live enrollment counts. Codes are unique; adapters report collisions as
//! [`CourseRepositoryError::DuplicateCode`] so the domain can answer with a
//! conflict instead of a generic failure.

use async_trait::async_trait;

use crate::domain::{Course, CourseCode, CourseFilter, CourseId, CourseOverview};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// Another course already uses this code.
        DuplicateCode { code: String } =>
            "course code already exists: {code}",
    }
}

/// Port for course storage and catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch a course by its unique code.
    async fn find_by_code(
        &self,
        code: &CourseCode,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch a course with its current enrollment count.
    async fn overview(
        &self,
        id: &CourseId,
    ) -> Result<Option<CourseOverview>, CourseRepositoryError>;

    /// List courses matching `filter`, ordered by code, with enrollment counts.
    async fn list(&self, filter: &CourseFilter)
    -> Result<Vec<CourseOverview>, CourseRepositoryError>;

    /// Distinct semester labels in ascending order.
    async fn semesters(&self) -> Result<Vec<String>, CourseRepositoryError>;

    /// Insert a new course.
    ///
    /// Fails with [`CourseRepositoryError::DuplicateCode`] if the code is taken.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Replace the editable fields of an existing course.
    ///
    /// Returns `false` when no course has `course.id`.
    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError>;

    /// Delete a course and, by cascade, its enrollments.
    ///
    /// Returns `false` when no course had the identifier.
    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError>;
}
