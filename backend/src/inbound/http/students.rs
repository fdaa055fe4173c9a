//! Student registration and schedule handlers.
//!
//! ```text
//! POST   /api/v1/students
//! GET    /api/v1/students/me/courses
//! DELETE /api/v1/students/{student_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EnrolledCourse, Error, Student, StudentId, StudentRegistration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::Actor;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_uuid, require, student_validation_error,
};

/// Self-service registration payload. Staff accounts are provisioned by the
/// catalogue seeder, never through this endpoint.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentRequest {
    /// Login name.
    pub username: Option<String>,
    /// Optional contact address.
    pub email: Option<String>,
}

/// Registered account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Account identifier, used as `X-User-Id`.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact address, if known.
    pub email: Option<String>,
    /// Whether the account may manage courses.
    pub is_staff: bool,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            username: student.username.to_string(),
            email: student.email,
            is_staff: student.is_staff,
        }
    }
}

/// One entry on a student's schedule.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourseResponse {
    /// Course identifier.
    pub course_id: String,
    /// Course code.
    pub code: String,
    /// Course title.
    pub title: String,
    /// Semester label.
    pub semester: String,
    /// Credit value.
    pub credits: u32,
    /// RFC 3339 enrollment timestamp.
    pub enrolled_at: String,
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(entry: EnrolledCourse) -> Self {
        let EnrolledCourse {
            course,
            enrolled_at,
        } = entry;
        Self {
            course_id: course.id.to_string(),
            code: course.code.to_string(),
            title: course.title,
            semester: course.semester,
            credits: course.credits,
            enrolled_at: enrolled_at.to_rfc3339(),
        }
    }
}

fn parse_registration(payload: RegisterStudentRequest) -> Result<StudentRegistration, Error> {
    let username = require(payload.username, FieldName::new("username"))?;
    StudentRegistration::new(username, payload.email, false)
        .map_err(|err| student_validation_error(&err))
}

/// Register a student account.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "registerStudent"
)]
#[post("/students")]
pub async fn register_student(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterStudentRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let student = state.students.register_student(registration).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

/// List the acting student's courses, newest enrollment first.
#[utoipa::path(
    get,
    path = "/api/v1/students/me/courses",
    params(("X-User-Id" = String, Header, description = "Acting student UUID")),
    responses(
        (status = 200, description = "Enrolled courses", body = [EnrolledCourseResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listMyCourses"
)]
#[get("/students/me/courses")]
pub async fn my_courses(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<EnrolledCourseResponse>>> {
    let courses = state.student_query.enrolled_courses(actor.id()).await?;
    Ok(web::Json(
        courses
            .into_iter()
            .map(EnrolledCourseResponse::from)
            .collect(),
    ))
}

/// Delete an account and its enrollments. Allowed for the account itself or
/// for staff.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = String, Path, description = "Student UUID"),
        ("X-User-Id" = String, Header, description = "Acting account UUID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Student not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{student_id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let student_id = parse_uuid(&path, FieldName::new("studentId")).map(StudentId::from_uuid)?;
    state.students.delete_student(actor.id(), &student_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
