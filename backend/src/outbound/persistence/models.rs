//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types live here so every adapter validates stored values the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Capacity, Course, CourseCode, CourseId, Enrollment, Student, StudentId, Username,
};

use super::schema::{courses, enrollments, students};

/// A stored value that no longer satisfies domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {table}.{column} is invalid: {message}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    column: &'static str,
    message: String,
}

impl CorruptRow {
    pub(crate) fn new(table: &'static str, column: &'static str, message: impl ToString) -> Self {
        Self {
            table,
            column,
            message: message.to_string(),
        }
    }
}

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub is_staff: bool,
}

impl TryFrom<StudentRow> for Student {
    type Error = CorruptRow;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|err| CorruptRow::new("students", "username", err))?;
        Ok(Self {
            id: StudentId::from_uuid(row.id),
            username,
            email: row.email,
            is_staff: row.is_staff,
        })
    }
}

/// Insertable struct for creating student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub is_staff: bool,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            id: *student.id.as_uuid(),
            username: student.username.as_str(),
            email: student.email.as_deref(),
            is_staff: student.is_staff,
        }
    }
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: String,
    pub semester: String,
    pub credits: i32,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = CorruptRow;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let code =
            CourseCode::new(row.code).map_err(|err| CorruptRow::new("courses", "code", err))?;
        let credits = u32::try_from(row.credits)
            .map_err(|err| CorruptRow::new("courses", "credits", err))?;
        let capacity = u32::try_from(row.capacity)
            .map_err(|err| CorruptRow::new("courses", "capacity", err))?;
        Ok(Self {
            id: CourseId::from_uuid(row.id),
            code,
            title: row.title,
            description: row.description,
            semester: row.semester,
            credits,
            capacity: Capacity::new(capacity),
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for creating course records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub code: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub semester: &'a str,
    pub credits: i32,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

/// Changeset for the editable course columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
pub(crate) struct CourseUpdate<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub semester: &'a str,
    pub credits: i32,
    pub capacity: i32,
}

fn column_value(column: &'static str, value: u32) -> Result<i32, CorruptRow> {
    i32::try_from(value).map_err(|err| CorruptRow::new("courses", column, err))
}

impl<'a> TryFrom<&'a Course> for NewCourseRow<'a> {
    type Error = CorruptRow;

    fn try_from(course: &'a Course) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *course.id.as_uuid(),
            code: course.code.as_str(),
            title: &course.title,
            description: &course.description,
            semester: &course.semester,
            credits: column_value("credits", course.credits)?,
            capacity: column_value("capacity", course.capacity.get())?,
            created_at: course.created_at,
        })
    }
}

impl<'a> TryFrom<&'a Course> for CourseUpdate<'a> {
    type Error = CorruptRow;

    fn try_from(course: &'a Course) -> Result<Self, Self::Error> {
        Ok(Self {
            code: course.code.as_str(),
            title: &course.title,
            description: &course.description,
            semester: &course.semester,
            credits: column_value("credits", course.credits)?,
            capacity: column_value("capacity", course.capacity.get())?,
        })
    }
}

/// Row struct for the enrollments table, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            student_id: StudentId::from_uuid(row.student_id),
            course_id: CourseId::from_uuid(row.course_id),
            enrolled_at: row.enrolled_at,
        }
    }
}

/// Saturating conversion for `COUNT(*)` results.
pub(crate) fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn course_row() -> CourseRow {
        CourseRow {
            id: Uuid::new_v4(),
            code: "CS101".to_owned(),
            title: "Intro to Programming".to_owned(),
            description: String::new(),
            semester: "Fall 2025".to_owned(),
            credits: 3,
            capacity: 40,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn course_row_round_trips_into_domain() {
        let course = Course::try_from(course_row()).expect("valid row");
        assert_eq!(course.capacity, Capacity::new(40));
        assert_eq!(course.code.as_str(), "CS101");
    }

    #[rstest]
    #[case("code", CourseRow { code: String::new(), ..course_row() })]
    #[case("capacity", CourseRow { capacity: -1, ..course_row() })]
    #[case("credits", CourseRow { credits: -3, ..course_row() })]
    fn corrupt_course_rows_name_the_column(#[case] column: &str, #[case] row: CourseRow) {
        let err = Course::try_from(row).expect_err("corrupt row");
        assert!(err.to_string().contains(&format!("courses.{column}")));
    }

    #[rstest]
    fn oversized_capacity_cannot_be_stored() {
        let mut course = Course::try_from(course_row()).expect("valid row");
        course.capacity = Capacity::new(u32::MAX);
        assert!(NewCourseRow::try_from(&course).is_err());
    }

    #[rstest]
    #[case(-5, 0)]
    #[case(7, 7)]
    #[case(i64::MAX, u32::MAX)]
    fn counts_saturate(#[case] raw: i64, #[case] expected: u32) {
        assert_eq!(count_to_u32(raw), expected);
    }
}
