//! Behavioural tests for the in-memory store.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{Capacity, CourseDraft, CourseFields, StudentRegistration};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_course(code: &str, semester: &str, capacity: u32) -> Course {
    let draft = CourseDraft::try_from(CourseFields {
        code: code.to_owned(),
        title: format!("{code} title"),
        description: String::new(),
        semester: semester.to_owned(),
        credits: 3,
        capacity,
    })
    .expect("valid draft");
    Course::from_draft(CourseId::random(), draft, t0())
}

fn make_student(username: &str) -> Student {
    StudentRegistration::new(username, None, false)
        .expect("valid registration")
        .into_student(StudentId::random())
}

#[fixture]
fn store() -> InMemoryCampusStore {
    InMemoryCampusStore::new()
}

async fn seeded(store: &InMemoryCampusStore, capacity: u32) -> (Student, Course) {
    let student = make_student("stu");
    let course = make_course("CS101", "Fall 2025", capacity);
    StudentRepository::insert(store, &student)
        .await
        .expect("insert student");
    CourseRepository::insert(store, &course)
        .await
        .expect("insert course");
    (student, course)
}

#[rstest]
#[tokio::test]
async fn claim_inserts_then_reports_existing(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 2).await;

    let first = store
        .claim_seat(&student.id, &course.id, t0())
        .await
        .expect("claim");
    let second = store
        .claim_seat(&student.id, &course.id, t0() + Duration::hours(1))
        .await
        .expect("claim");

    let expected = Enrollment {
        student_id: student.id,
        course_id: course.id,
        enrolled_at: t0(),
    };
    assert_eq!(first, SeatClaim::Claimed(expected.clone()));
    assert_eq!(second, SeatClaim::Existing(expected));
}

#[rstest]
#[tokio::test]
async fn claim_rejects_when_full(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 1).await;
    let other = make_student("other");
    StudentRepository::insert(&store, &other)
        .await
        .expect("insert student");
    store
        .claim_seat(&other.id, &course.id, t0())
        .await
        .expect("claim");

    let claim = store
        .claim_seat(&student.id, &course.id, t0())
        .await
        .expect("claim");

    assert_eq!(
        claim,
        SeatClaim::Full {
            capacity: Capacity::new(1),
            enrolled: 1
        }
    );
}

#[rstest]
#[tokio::test]
async fn zero_capacity_never_fills(store: InMemoryCampusStore) {
    let course = make_course("CS199", "Fall 2025", 0);
    CourseRepository::insert(&store, &course)
        .await
        .expect("insert course");
    for index in 0..5 {
        let student = make_student(&format!("student{index}"));
        StudentRepository::insert(&store, &student)
            .await
            .expect("insert student");
        let claim = store
            .claim_seat(&student.id, &course.id, t0())
            .await
            .expect("claim");
        assert!(matches!(claim, SeatClaim::Claimed(_)));
    }
}

#[rstest]
#[tokio::test]
async fn claim_reports_missing_records(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 2).await;

    let no_student = store
        .claim_seat(&StudentId::random(), &course.id, t0())
        .await
        .expect("claim");
    let no_course = store
        .claim_seat(&student.id, &CourseId::random(), t0())
        .await
        .expect("claim");

    assert_eq!(no_student, SeatClaim::StudentMissing);
    assert_eq!(no_course, SeatClaim::CourseMissing);
}

#[rstest]
#[tokio::test]
async fn release_removes_only_existing_rows(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 2).await;
    store
        .claim_seat(&student.id, &course.id, t0())
        .await
        .expect("claim");

    assert!(store.release_seat(&student.id, &course.id).await.expect("release"));
    assert!(!store.release_seat(&student.id, &course.id).await.expect("release"));
    assert!(store.find(&student.id, &course.id).await.expect("find").is_none());
}

#[rstest]
#[tokio::test]
async fn deleting_a_course_cascades_to_enrollments(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 2).await;
    store
        .claim_seat(&student.id, &course.id, t0())
        .await
        .expect("claim");

    assert!(CourseRepository::delete(&store, &course.id).await.expect("delete"));

    let schedule = store
        .courses_for_student(&student.id)
        .await
        .expect("schedule");
    assert!(schedule.is_empty());
}

#[rstest]
#[tokio::test]
async fn schedule_is_newest_first(store: InMemoryCampusStore) {
    let (student, first) = seeded(&store, 2).await;
    let second = make_course("CS102", "Fall 2025", 2);
    CourseRepository::insert(&store, &second)
        .await
        .expect("insert course");
    store
        .claim_seat(&student.id, &first.id, t0())
        .await
        .expect("claim");
    store
        .claim_seat(&student.id, &second.id, t0() + Duration::days(1))
        .await
        .expect("claim");

    let codes: Vec<String> = store
        .courses_for_student(&student.id)
        .await
        .expect("schedule")
        .into_iter()
        .map(|entry| entry.course.code.into())
        .collect();

    assert_eq!(codes, ["CS102", "CS101"]);
}

#[rstest]
#[tokio::test]
async fn list_filters_and_orders_by_code(store: InMemoryCampusStore) {
    for (code, semester) in [
        ("CS103", "Spring 2026"),
        ("CS102", "Fall 2025"),
        ("CS101", "Fall 2025"),
    ] {
        CourseRepository::insert(&store, &make_course(code, semester, 10))
            .await
            .expect("insert course");
    }

    let fall = store
        .list(&CourseFilter::new(Some("Fall 2025".to_owned()), None))
        .await
        .expect("list");
    let searched = store
        .list(&CourseFilter::new(None, Some("spring".to_owned())))
        .await
        .expect("list");
    let semesters = store.semesters().await.expect("semesters");

    let fall_codes: Vec<&str> = fall.iter().map(|o| o.course.code.as_str()).collect();
    assert_eq!(fall_codes, ["CS101", "CS102"]);
    assert_eq!(searched.len(), 1);
    assert_eq!(semesters, ["Fall 2025", "Spring 2026"]);
}

#[rstest]
#[tokio::test]
async fn codes_and_usernames_are_unique(store: InMemoryCampusStore) {
    let (student, course) = seeded(&store, 2).await;

    let course_err = CourseRepository::insert(&store, &make_course("CS101", "Fall 2025", 5))
        .await
        .expect_err("duplicate code");
    let student_err = StudentRepository::insert(&store, &make_student("stu"))
        .await
        .expect_err("duplicate username");

    assert!(matches!(course_err, CourseRepositoryError::DuplicateCode { .. }));
    assert!(matches!(
        student_err,
        StudentRepositoryError::DuplicateUsername { .. }
    ));
    assert!(StudentRepository::delete(&store, &student.id).await.expect("delete"));
    assert!(
        CourseRepository::find_by_id(&store, &course.id)
            .await
            .expect("find")
            .is_some()
    );
}
