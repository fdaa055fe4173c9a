//! Tests for the enroll and drop handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::domain::ports::EnrollmentRepository;
use crate::inbound::http::actor::USER_ID_HEADER;
use crate::inbound::http::test_utils::{api_app, seed_account, seed_course};
use crate::outbound::memory::InMemoryCampusStore;

#[fixture]
fn store() -> Arc<InMemoryCampusStore> {
    Arc::new(InMemoryCampusStore::new())
}

fn put(course: &str, actor: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::put()
        .uri(&format!("/api/v1/courses/{course}/enrollment"))
        .insert_header((USER_ID_HEADER, actor.to_owned()))
}

fn delete(course: &str, actor: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{course}/enrollment"))
        .insert_header((USER_ID_HEADER, actor.to_owned()))
}

#[rstest]
#[actix_web::test]
async fn repeated_put_is_idempotent(store: Arc<InMemoryCampusStore>) {
    let student = seed_account(&store, "stu", false).await;
    let course = seed_course(&store, "CS101", 2).await;
    let app = actix_test::init_service(api_app(&store)).await;
    let (course_id, actor) = (course.id.to_string(), student.id.to_string());

    let first = actix_test::call_service(&app, put(&course_id, &actor).to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: EnrollmentResponse = actix_test::read_body_json(first).await;
    assert_eq!(first.status, EnrollStatus::Enrolled);

    let second = actix_test::call_service(&app, put(&course_id, &actor).to_request()).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second: EnrollmentResponse = actix_test::read_body_json(second).await;
    assert_eq!(second.status, EnrollStatus::AlreadyEnrolled);
    assert_eq!(second.enrolled_at, first.enrolled_at);

    let rows = store
        .courses_for_student(&student.id)
        .await
        .expect("schedule");
    assert_eq!(rows.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn full_course_answers_conflict(store: Arc<InMemoryCampusStore>) {
    let first = seed_account(&store, "first", false).await;
    let second = seed_account(&store, "second", false).await;
    let course = seed_course(&store, "CS101", 1).await;
    let app = actix_test::init_service(api_app(&store)).await;
    let course_id = course.id.to_string();

    let ok = actix_test::call_service(&app, put(&course_id, &first.id.to_string()).to_request())
        .await;
    assert_eq!(ok.status(), StatusCode::CREATED);

    let full =
        actix_test::call_service(&app, put(&course_id, &second.id.to_string()).to_request())
            .await;
    assert_eq!(full.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(full).await;
    assert_eq!(body["details"]["code"], "course_full");
    assert_eq!(body["details"]["capacity"], 1);
}

#[rstest]
#[actix_web::test]
async fn unknown_course_is_not_found(store: Arc<InMemoryCampusStore>) {
    let student = seed_account(&store, "stu", false).await;
    let app = actix_test::init_service(api_app(&store)).await;

    let response = actix_test::call_service(
        &app,
        put(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            &student.id.to_string(),
        )
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn drop_reports_dropped_then_not_enrolled(store: Arc<InMemoryCampusStore>) {
    let student = seed_account(&store, "stu", false).await;
    let course = seed_course(&store, "CS101", 5).await;
    let app = actix_test::init_service(api_app(&store)).await;
    let (course_id, actor) = (course.id.to_string(), student.id.to_string());
    actix_test::call_service(&app, put(&course_id, &actor).to_request()).await;

    let dropped: DropResponse = actix_test::call_and_read_body_json(
        &app,
        delete(&course_id, &actor).to_request(),
    )
    .await;
    let again: DropResponse = actix_test::call_and_read_body_json(
        &app,
        delete(&course_id, &actor).to_request(),
    )
    .await;

    assert_eq!(dropped.status, DropStatus::Dropped);
    assert_eq!(again.status, DropStatus::NotEnrolled);
}

#[rstest]
#[actix_web::test]
async fn enrollment_requires_an_actor(store: Arc<InMemoryCampusStore>) {
    let course = seed_course(&store, "CS101", 5).await;
    let app = actix_test::init_service(api_app(&store)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/courses/{}/enrollment", course.id))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
