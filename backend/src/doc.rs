//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the error
//! schema wrappers that keep domain types free of utoipa, and the
//! `X-User-Id` header scheme used by actor-bound routes.
//!
//! Swagger UI serves the document in debug builds and the `openapi-dump`
//! binary prints it for external tooling.

use crate::inbound::http::courses::{CourseRequest, CourseResponse};
use crate::inbound::http::enrollments::{
    DropResponse, DropStatus, EnrollStatus, EnrollmentResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::{
    EnrolledCourseResponse, RegisterStudentRequest, StudentResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the acting-user header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ActingUser",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "UUID of the authenticated account, set by the fronting auth proxy.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course enrollment API",
        description = "Course catalogue, staff course management, and seat-limited enrollment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::list_semesters,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::enrollments::enroll,
        crate::inbound::http::enrollments::drop_enrollment,
        crate::inbound::http::students::register_student,
        crate::inbound::http::students::my_courses,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CourseRequest,
        CourseResponse,
        EnrollStatus,
        EnrollmentResponse,
        DropStatus,
        DropResponse,
        RegisterStudentRequest,
        StudentResponse,
        EnrolledCourseResponse,
    )),
    tags(
        (name = "courses", description = "Catalogue reads and staff course management"),
        (name = "enrollments", description = "Enroll in and drop courses"),
        (name = "students", description = "Registration and schedules"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
