//! Student registry service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::actor::{map_student_repository_error, resolve_actor};
use crate::domain::ports::{
    EnrollmentRepository, EnrollmentRepositoryError, StudentCommand, StudentQuery,
    StudentRepository,
};
use crate::domain::{EnrolledCourse, Error, Student, StudentId, StudentRegistration};

/// Registry service implementing [`StudentCommand`] and [`StudentQuery`].
#[derive(Clone)]
pub struct StudentService<S, E> {
    students: Arc<S>,
    enrollments: Arc<E>,
}

impl<S, E> StudentService<S, E> {
    /// Create a service over the given stores.
    pub fn new(students: Arc<S>, enrollments: Arc<E>) -> Self {
        Self {
            students,
            enrollments,
        }
    }
}

fn student_not_found(student_id: &StudentId) -> Error {
    Error::not_found(format!("student {student_id} not found"))
}

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        other => Error::internal(format!("enrollment repository error: {other}")),
    }
}

#[async_trait]
impl<S, E> StudentCommand for StudentService<S, E>
where
    S: StudentRepository,
    E: EnrollmentRepository,
{
    async fn register_student(&self, registration: StudentRegistration) -> Result<Student, Error> {
        let student = registration.into_student(StudentId::random());
        self.students
            .insert(&student)
            .await
            .map_err(map_student_repository_error)?;
        info!(student_id = %student.id, username = %student.username, "student registered");
        Ok(student)
    }

    async fn delete_student(
        &self,
        actor: &StudentId,
        student_id: &StudentId,
    ) -> Result<(), Error> {
        let account = resolve_actor(self.students.as_ref(), actor).await?;
        if !account.may_act_for(student_id) {
            return Err(Error::forbidden(
                "only staff may delete other student accounts",
            ));
        }
        let removed = self
            .students
            .delete(student_id)
            .await
            .map_err(map_student_repository_error)?;
        if !removed {
            return Err(student_not_found(student_id));
        }
        info!(%student_id, %actor, "student deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, E> StudentQuery for StudentService<S, E>
where
    S: StudentRepository,
    E: EnrollmentRepository,
{
    async fn get_student(&self, student_id: &StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(student_id)
            .await
            .map_err(map_student_repository_error)?
            .ok_or_else(|| student_not_found(student_id))
    }

    async fn enrolled_courses(&self, student_id: &StudentId) -> Result<Vec<EnrolledCourse>, Error> {
        self.get_student(student_id).await?;
        self.enrollments
            .courses_for_student(student_id)
            .await
            .map_err(map_enrollment_error)
    }
}
