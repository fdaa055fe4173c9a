//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! `claim_seat` runs in one transaction that locks the course row with
//! `SELECT ... FOR UPDATE` before counting. Concurrent claims for the same
//! course therefore queue on that lock, and each sees the rows committed by
//! the claims ahead of it. The composite primary key
//! `unique_student_course_enrollment` backs up the duplicate check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    Capacity, Course, CourseId, EnrolledCourse, Enrollment, SeatClaim, StudentId,
};

use super::error_mapping::{DieselFailure, classify, corrupt, pool_message};
use super::models::{CorruptRow, CourseRow, EnrollmentRow, count_to_u32};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments, students};

const PAIR_CONSTRAINT: &str = "unique_student_course_enrollment";

/// Diesel-backed implementation of the [`EnrollmentRepository`] port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    EnrollmentRepositoryError::connection(pool_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => EnrollmentRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(PAIR_CONSTRAINT) =>
        {
            EnrollmentRepositoryError::duplicate_enrollment(PAIR_CONSTRAINT)
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            EnrollmentRepositoryError::missing_reference(constraint.unwrap_or_default())
        }
        DieselFailure::UniqueViolation { constraint } => EnrollmentRepositoryError::query(
            format!("constraint violated: {}", constraint.unwrap_or_default()),
        ),
        DieselFailure::Query(message) => EnrollmentRepositoryError::query(message),
    }
}

fn capacity_from_column(capacity: i32) -> Result<Capacity, diesel::result::Error> {
    u32::try_from(capacity)
        .map(Capacity::new)
        .map_err(|err| corrupt(CorruptRow::new("courses", "capacity", err)))
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn claim_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<SeatClaim, EnrollmentRepositoryError> {
        let student_uuid = *student_id.as_uuid();
        let course_uuid = *course_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let claim = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let student_exists: bool =
                        diesel::select(diesel::dsl::exists(students::table.find(student_uuid)))
                            .get_result(conn)
                            .await?;
                    if !student_exists {
                        return Ok(SeatClaim::StudentMissing);
                    }

                    let locked: Option<i32> = courses::table
                        .find(course_uuid)
                        .select(courses::capacity)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(raw_capacity) = locked else {
                        return Ok(SeatClaim::CourseMissing);
                    };
                    let capacity = capacity_from_column(raw_capacity)?;

                    let existing: Option<EnrollmentRow> = enrollments::table
                        .find((student_uuid, course_uuid))
                        .select(EnrollmentRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if let Some(row) = existing {
                        return Ok(SeatClaim::Existing(row.into()));
                    }

                    let enrolled: i64 = enrollments::table
                        .filter(enrollments::course_id.eq(course_uuid))
                        .count()
                        .get_result(conn)
                        .await?;
                    let enrolled = count_to_u32(enrolled);
                    if !capacity.admits(enrolled) {
                        return Ok(SeatClaim::Full { capacity, enrolled });
                    }

                    let inserted = diesel::insert_into(enrollments::table)
                        .values(EnrollmentRow {
                            student_id: student_uuid,
                            course_id: course_uuid,
                            enrolled_at,
                        })
                        .returning(EnrollmentRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(SeatClaim::Claimed(inserted.into()))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(%student_id, %course_id, ?claim, "seat claim resolved");
        Ok(claim)
    }

    async fn release_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            enrollments::table.find((*student_id.as_uuid(), *course_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EnrollmentRow> = enrollments::table
            .find((*student_id.as_uuid(), *course_id.as_uuid()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Enrollment::from))
    }

    async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<EnrolledCourse>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CourseRow, DateTime<Utc>)> = enrollments::table
            .inner_join(courses::table)
            .filter(enrollments::student_id.eq(student_id.as_uuid()))
            .order((enrollments::enrolled_at.desc(), courses::code.asc()))
            .select((CourseRow::as_select(), enrollments::enrolled_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, enrolled_at)| {
                let course = Course::try_from(row)
                    .map_err(|err| EnrollmentRepositoryError::query(err.to_string()))?;
                Ok(EnrolledCourse {
                    course,
                    enrolled_at,
                })
            })
            .collect()
    }
}
