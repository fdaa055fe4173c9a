//! Course catalogue and staff course management handlers.
//!
//! ```text
//! GET    /api/v1/courses?semester=&search=
//! GET    /api/v1/courses/semesters
//! GET    /api/v1/courses/{course_id}
//! POST   /api/v1/courses
//! PUT    /api/v1/courses/{course_id}
//! DELETE /api/v1/courses/{course_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Course, CourseDraft, CourseFields, CourseFilter, CourseId, CourseOverview, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::Actor;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, course_validation_error, parse_uuid, require,
};

/// Catalogue listing filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCoursesQuery {
    /// Exact semester label, for example `Fall 2025`.
    pub semester: Option<String>,
    /// Case-insensitive match against code, title and semester.
    pub search: Option<String>,
}

/// Request payload for creating or replacing a course.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    /// Unique short code such as `CS101`.
    pub code: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Free-form description. Defaults to empty.
    pub description: Option<String>,
    /// Semester label.
    pub semester: Option<String>,
    /// Credit value. Defaults to 0.
    #[schema(maximum = 2_147_483_647)]
    pub credits: Option<u32>,
    /// Seat ceiling. 0 or absent means unlimited.
    #[schema(maximum = 2_147_483_647)]
    pub capacity: Option<u32>,
}

/// Course with its live enrollment figures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    /// Course identifier.
    pub id: String,
    /// Unique short code.
    pub code: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Semester label.
    pub semester: String,
    /// Credit value.
    pub credits: u32,
    /// Seat ceiling; 0 means unlimited.
    pub capacity: u32,
    /// Current enrollment count.
    pub enrolled_count: u32,
    /// Open seats, `null` for unlimited courses.
    pub seats_remaining: Option<u32>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<CourseOverview> for CourseResponse {
    fn from(overview: CourseOverview) -> Self {
        let seats_remaining = overview.seats_remaining().as_limited();
        let CourseOverview {
            course,
            enrolled_count,
        } = overview;
        Self {
            id: course.id.to_string(),
            code: course.code.to_string(),
            title: course.title,
            description: course.description,
            semester: course.semester,
            credits: course.credits,
            capacity: course.capacity.get(),
            enrolled_count,
            seats_remaining,
            created_at: course.created_at.to_rfc3339(),
        }
    }
}

pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    parse_uuid(raw, FieldName::new("courseId")).map(CourseId::from_uuid)
}

fn parse_course_request(payload: CourseRequest) -> Result<CourseDraft, Error> {
    let fields = CourseFields {
        code: require(payload.code, FieldName::new("code"))?,
        title: require(payload.title, FieldName::new("title"))?,
        description: payload.description.unwrap_or_default(),
        semester: require(payload.semester, FieldName::new("semester"))?,
        credits: payload.credits.unwrap_or_default(),
        capacity: payload.capacity.unwrap_or_default(),
    };
    CourseDraft::try_from(fields).map_err(|err| course_validation_error(&err))
}

/// List courses, optionally filtered by semester and search text.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Courses ordered by code", body = [CourseResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<ListCoursesQuery>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let ListCoursesQuery { semester, search } = query.into_inner();
    let filter = CourseFilter::new(semester, search);
    let courses = state.catalogue.list_courses(&filter).await?;
    Ok(web::Json(
        courses.into_iter().map(CourseResponse::from).collect(),
    ))
}

/// List the distinct semester labels in the catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/courses/semesters",
    responses(
        (status = 200, description = "Sorted semester labels", body = [String]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listSemesters"
)]
#[get("/courses/semesters")]
pub async fn list_semesters(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    Ok(web::Json(state.catalogue.list_semesters().await?))
}

/// Fetch one course with its seat figures.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course UUID")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 400, description = "Invalid course id", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{course_id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course_id = parse_course_id(&path)?;
    let overview = state.catalogue.get_course(&course_id).await?;
    Ok(web::Json(CourseResponse::from(overview)))
}

/// Create a course. Staff only.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequest,
    params(("X-User-Id" = String, Header, description = "Acting account UUID")),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not staff", body = ErrorSchema),
        (status = 409, description = "Course code taken", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_course_request(payload.into_inner())?;
    let course: Course = state.course_admin.create_course(actor.id(), draft).await?;
    let overview = CourseOverview {
        course,
        enrolled_count: 0,
    };
    Ok(HttpResponse::Created().json(CourseResponse::from(overview)))
}

/// Replace a course's editable fields. Staff only.
///
/// Lowering capacity below the current count keeps existing enrollments.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{course_id}",
    request_body = CourseRequest,
    params(
        ("course_id" = String, Path, description = "Course UUID"),
        ("X-User-Id" = String, Header, description = "Acting account UUID")
    ),
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not staff", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 409, description = "Course code taken", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{course_id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course_id = parse_course_id(&path)?;
    let draft = parse_course_request(payload.into_inner())?;
    state
        .course_admin
        .update_course(actor.id(), &course_id, draft)
        .await?;
    let overview = state.catalogue.get_course(&course_id).await?;
    Ok(web::Json(CourseResponse::from(overview)))
}

/// Delete a course and every enrollment in it. Staff only.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course UUID"),
        ("X-User-Id" = String, Header, description = "Acting account UUID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not staff", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{course_id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(&path)?;
    state.course_admin.delete_course(actor.id(), &course_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
