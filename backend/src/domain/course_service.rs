//! Course catalogue and administration services.
//!
//! [`CourseService`] answers catalogue reads for everyone and applies course
//! mutations on behalf of staff accounts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::actor::require_staff;
use crate::domain::ports::{
    CourseAdminCommand, CourseCatalogueQuery, CourseRepository, CourseRepositoryError,
    StudentRepository,
};
use crate::domain::{
    Course, CourseDraft, CourseFilter, CourseId, CourseOverview, Error, SeatsRemaining, StudentId,
};

/// Catalogue and course administration service.
#[derive(Clone)]
pub struct CourseService<C, S> {
    courses: Arc<C>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<C, S> CourseService<C, S> {
    /// Create a service over the given stores.
    pub fn new(courses: Arc<C>, students: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            students,
            clock,
        }
    }
}

/// Map course repository failures into domain errors.
pub(crate) fn map_course_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::DuplicateCode { code } => {
            Error::conflict(format!("course code {code} is already in use")).with_details(json!({
                "field": "code",
                "code": "duplicate_course_code",
            }))
        }
    }
}

fn course_not_found(course_id: &CourseId) -> Error {
    Error::not_found(format!("course {course_id} not found"))
}

impl<C, S> CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    async fn require_overview(&self, course_id: &CourseId) -> Result<CourseOverview, Error> {
        self.courses
            .overview(course_id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| course_not_found(course_id))
    }
}

#[async_trait]
impl<C, S> CourseCatalogueQuery for CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<CourseOverview>, Error> {
        self.courses
            .list(filter)
            .await
            .map_err(map_course_repository_error)
    }

    async fn get_course(&self, course_id: &CourseId) -> Result<CourseOverview, Error> {
        self.require_overview(course_id).await
    }

    async fn enrolled_count(&self, course_id: &CourseId) -> Result<u32, Error> {
        Ok(self.require_overview(course_id).await?.enrolled_count)
    }

    async fn seats_remaining(&self, course_id: &CourseId) -> Result<SeatsRemaining, Error> {
        Ok(self.require_overview(course_id).await?.seats_remaining())
    }

    async fn list_semesters(&self) -> Result<Vec<String>, Error> {
        self.courses
            .semesters()
            .await
            .map_err(map_course_repository_error)
    }
}

#[async_trait]
impl<C, S> CourseAdminCommand for CourseService<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    async fn create_course(&self, actor: &StudentId, draft: CourseDraft) -> Result<Course, Error> {
        require_staff(self.students.as_ref(), actor).await?;
        let course = Course::from_draft(CourseId::random(), draft, self.clock.utc());
        self.courses
            .insert(&course)
            .await
            .map_err(map_course_repository_error)?;
        info!(course_id = %course.id, code = %course.code, %actor, "course created");
        Ok(course)
    }

    async fn update_course(
        &self,
        actor: &StudentId,
        course_id: &CourseId,
        draft: CourseDraft,
    ) -> Result<Course, Error> {
        require_staff(self.students.as_ref(), actor).await?;
        let existing = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| course_not_found(course_id))?;
        let updated = existing.with_draft(draft);
        let found = self
            .courses
            .update(&updated)
            .await
            .map_err(map_course_repository_error)?;
        if !found {
            return Err(course_not_found(course_id));
        }
        info!(%course_id, code = %updated.code, %actor, "course updated");
        Ok(updated)
    }

    async fn delete_course(&self, actor: &StudentId, course_id: &CourseId) -> Result<(), Error> {
        require_staff(self.students.as_ref(), actor).await?;
        let removed = self
            .courses
            .delete(course_id)
            .await
            .map_err(map_course_repository_error)?;
        if !removed {
            return Err(course_not_found(course_id));
        }
        info!(%course_id, %actor, "course deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
