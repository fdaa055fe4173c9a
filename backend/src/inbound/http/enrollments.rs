//! Enroll and drop handlers for the acting student.
//!
//! ```text
//! PUT    /api/v1/courses/{course_id}/enrollment
//! DELETE /api/v1/courses/{course_id}/enrollment
//! ```
//!
//! Both verbs are idempotent. A repeated PUT answers 200 with the existing
//! enrollment and a repeated DELETE answers 200 with `not_enrolled`.

use actix_web::{HttpResponse, delete, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Capacity, CourseId, DropOutcome, EnrollOutcome, Enrollment, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::Actor;
use crate::inbound::http::courses::parse_course_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Whether the PUT created the enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollStatus {
    /// A seat was claimed by this request.
    Enrolled,
    /// The student already held a seat.
    AlreadyEnrolled,
}

/// Enrollment record returned by a successful PUT.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    /// Outcome of the request.
    pub status: EnrollStatus,
    /// Enrolled student.
    pub student_id: String,
    /// Course holding the seat.
    pub course_id: String,
    /// RFC 3339 timestamp of the original claim.
    pub enrolled_at: String,
}

impl EnrollmentResponse {
    fn new(status: EnrollStatus, enrollment: Enrollment) -> Self {
        Self {
            status,
            student_id: enrollment.student_id.to_string(),
            course_id: enrollment.course_id.to_string(),
            enrolled_at: enrollment.enrolled_at.to_rfc3339(),
        }
    }
}

/// Outcome of a DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DropStatus {
    /// The enrollment was removed.
    Dropped,
    /// There was nothing to remove.
    NotEnrolled,
}

impl From<DropOutcome> for DropStatus {
    fn from(outcome: DropOutcome) -> Self {
        match outcome {
            DropOutcome::Dropped => Self::Dropped,
            DropOutcome::NotEnrolled => Self::NotEnrolled,
        }
    }
}

/// Body returned by a DELETE.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DropResponse {
    /// Outcome of the request.
    pub status: DropStatus,
}

fn course_full_error(course_id: &CourseId, capacity: Capacity) -> Error {
    Error::conflict(format!("course {course_id} is full")).with_details(json!({
        "code": "course_full",
        "capacity": capacity.get(),
    }))
}

/// Claim a seat in the course for the acting student.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{course_id}/enrollment",
    params(
        ("course_id" = String, Path, description = "Course UUID"),
        ("X-User-Id" = String, Header, description = "Acting student UUID")
    ),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 200, description = "Already enrolled", body = EnrollmentResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Student or course not found", body = ErrorSchema),
        (status = 409, description = "Course full", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "enroll"
)]
#[put("/courses/{course_id}/enrollment")]
pub async fn enroll(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(&path)?;
    match state.enrollments.enroll(actor.id(), &course_id).await? {
        EnrollOutcome::Enrolled(enrollment) => Ok(HttpResponse::Created().json(
            EnrollmentResponse::new(EnrollStatus::Enrolled, enrollment),
        )),
        EnrollOutcome::AlreadyEnrolled(enrollment) => Ok(HttpResponse::Ok().json(
            EnrollmentResponse::new(EnrollStatus::AlreadyEnrolled, enrollment),
        )),
        EnrollOutcome::CourseFull { capacity } => Err(course_full_error(&course_id, capacity)),
    }
}

/// Give back the acting student's seat in the course.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{course_id}/enrollment",
    params(
        ("course_id" = String, Path, description = "Course UUID"),
        ("X-User-Id" = String, Header, description = "Acting student UUID")
    ),
    responses(
        (status = 200, description = "Dropped or not enrolled", body = DropResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "dropEnrollment"
)]
#[delete("/courses/{course_id}/enrollment")]
pub async fn drop_enrollment(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<DropResponse>> {
    let course_id = parse_course_id(&path)?;
    let outcome = state
        .enrollments
        .drop_enrollment(actor.id(), &course_id)
        .await?;
    Ok(web::Json(DropResponse {
        status: outcome.into(),
    }))
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
