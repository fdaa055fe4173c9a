//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Catalogue reads attach live enrollment counts with a second grouped query
//! over `enrollments` instead of denormalising a counter onto `courses`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseCode, CourseFilter, CourseId, CourseOverview};

use super::error_mapping::{DieselFailure, classify, pool_message};
use super::models::{CourseRow, CourseUpdate, NewCourseRow, count_to_u32};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments};

const CODE_CONSTRAINT: &str = "courses_code_key";

/// Diesel-backed implementation of the [`CourseRepository`] port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, CourseRepositoryError> {
        self.pool.get().await.map_err(map_pool_error)
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    CourseRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_write_error(error, "")
}

fn map_write_error(error: diesel::result::Error, code: &str) -> CourseRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => CourseRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(CODE_CONSTRAINT) =>
        {
            CourseRepositoryError::duplicate_code(code)
        }
        DieselFailure::UniqueViolation { constraint }
        | DieselFailure::ForeignKeyViolation { constraint } => CourseRepositoryError::query(
            format!("constraint violated: {}", constraint.unwrap_or_default()),
        ),
        DieselFailure::Query(message) => CourseRepositoryError::query(message),
    }
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    Course::try_from(row).map_err(|err| CourseRepositoryError::query(err.to_string()))
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

async fn enrollment_counts(
    conn: &mut AsyncPgConnection,
    course_ids: &[Uuid],
) -> Result<HashMap<Uuid, u32>, CourseRepositoryError> {
    if course_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(Uuid, i64)> = enrollments::table
        .filter(enrollments::course_id.eq_any(course_ids))
        .group_by(enrollments::course_id)
        .select((enrollments::course_id, count_star()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(counts
        .into_iter()
        .map(|(course_id, count)| (course_id, count_to_u32(count)))
        .collect())
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_course)
            .transpose()
    }

    async fn find_by_code(
        &self,
        code: &CourseCode,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        courses::table
            .filter(courses::code.eq(code.as_str()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_course)
            .transpose()
    }

    async fn overview(
        &self,
        id: &CourseId,
    ) -> Result<Option<CourseOverview>, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        let Some(row) = courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        let enrolled: i64 = enrollments::table
            .filter(enrollments::course_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(CourseOverview {
            course: row_to_course(row)?,
            enrolled_count: count_to_u32(enrolled),
        }))
    }

    async fn list(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<CourseOverview>, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        let mut query = courses::table
            .select(CourseRow::as_select())
            .order(courses::code.asc())
            .into_boxed();
        if let Some(semester) = filter.semester() {
            query = query.filter(courses::semester.eq(semester.to_owned()));
        }
        if let Some(search) = filter.search() {
            let pattern = like_pattern(search);
            query = query.filter(
                courses::code
                    .ilike(pattern.clone())
                    .or(courses::title.ilike(pattern.clone()))
                    .or(courses::semester.ilike(pattern)),
            );
        }
        let rows: Vec<CourseRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let counts = enrollment_counts(&mut conn, &ids).await?;
        rows.into_iter()
            .map(|row| {
                let enrolled_count = counts.get(&row.id).copied().unwrap_or(0);
                Ok(CourseOverview {
                    course: row_to_course(row)?,
                    enrolled_count,
                })
            })
            .collect()
    }

    async fn semesters(&self) -> Result<Vec<String>, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        courses::table
            .select(courses::semester)
            .distinct()
            .order(courses::semester.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let row = NewCourseRow::try_from(course)
            .map_err(|err| CourseRepositoryError::query(err.to_string()))?;
        let mut conn = self.connection().await?;

        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, course.code.as_str()))
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let changes = CourseUpdate::try_from(course)
            .map_err(|err| CourseRepositoryError::query(err.to_string()))?;
        let mut conn = self.connection().await?;

        let updated = diesel::update(courses::table.find(course.id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, course.code.as_str()))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.connection().await?;

        let removed = diesel::delete(courses::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
