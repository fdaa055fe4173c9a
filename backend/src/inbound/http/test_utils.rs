//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;

use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::domain::{
    Course, CourseDraft, CourseFields, CourseId, CourseService, EnrollmentService, Student,
    StudentId, StudentRegistration, StudentService,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryCampusStore;

/// HTTP state wired to the real services over an in-memory store.
pub(crate) fn memory_state(store: &Arc<InMemoryCampusStore>) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let courses = Arc::new(CourseService::new(store.clone(), store.clone(), clock.clone()));
    let students = Arc::new(StudentService::new(store.clone(), store.clone()));
    HttpState::new(HttpStatePorts {
        enrollments: Arc::new(EnrollmentService::new(store.clone(), clock)),
        catalogue: courses.clone(),
        course_admin: courses,
        students: students.clone(),
        student_query: students,
    })
}

/// Application exposing the full API over `store`.
pub(crate) fn api_app(
    store: &Arc<InMemoryCampusStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(memory_state(store)))
        .configure(configure_api)
}

pub(crate) async fn seed_account(
    store: &InMemoryCampusStore,
    username: &str,
    is_staff: bool,
) -> Student {
    let student = StudentRegistration::new(username, None, is_staff)
        .expect("valid registration")
        .into_student(StudentId::random());
    StudentRepository::insert(store, &student)
        .await
        .expect("insert account");
    student
}

pub(crate) async fn seed_course(store: &InMemoryCampusStore, code: &str, capacity: u32) -> Course {
    let draft = CourseDraft::try_from(CourseFields {
        code: code.to_owned(),
        title: format!("{code} title"),
        description: String::new(),
        semester: "Fall 2025".to_owned(),
        credits: 3,
        capacity,
    })
    .expect("valid draft");
    let created_at = Utc
        .with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    let course = Course::from_draft(CourseId::random(), draft, created_at);
    CourseRepository::insert(store, &course)
        .await
        .expect("insert course");
    course
}
