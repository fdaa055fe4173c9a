//! HTTP inbound adapter exposing REST endpoints.

pub mod actor;
pub mod courses;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod students;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` routes together with extractor error handlers.
///
/// The handlers expect an [`state::HttpState`] in application data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api/v1")
                // Literal segments go before `{course_id}` so they are not
                // captured as an id.
                .service(courses::list_semesters)
                .service(courses::list_courses)
                .service(courses::create_course)
                .service(courses::get_course)
                .service(courses::update_course)
                .service(courses::delete_course)
                .service(enrollments::enroll)
                .service(enrollments::drop_enrollment)
                .service(students::register_student)
                .service(students::my_courses)
                .service(students::delete_student),
        );
}
