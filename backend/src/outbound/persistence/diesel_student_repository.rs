//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Student, StudentId, Username};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::{NewStudentRow, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

const USERNAME_CONSTRAINT: &str = "students_username_key";

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error, username: Option<&Username>) -> StudentRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => StudentRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(USERNAME_CONSTRAINT) =>
        {
            StudentRepositoryError::duplicate_username(
                username.map_or_else(String::new, |name| name.as_str().to_owned()),
            )
        }
        DieselFailure::UniqueViolation { constraint }
        | DieselFailure::ForeignKeyViolation { constraint } => StudentRepositoryError::query(
            format!("constraint violated: {}", constraint.unwrap_or_default()),
        ),
        DieselFailure::Query(message) => StudentRepositoryError::query(message),
    }
}

fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    Student::try_from(row).map_err(|err| StudentRepositoryError::query(err.to_string()))
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        students::table
            .find(id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_student)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        students::table
            .filter(students::username.eq(username.as_str()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_student)
            .transpose()
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(students::table)
            .values(NewStudentRow::from(student))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(&student.username)))
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(students::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(removed > 0)
    }
}
