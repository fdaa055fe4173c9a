//! Tests for the enrollment manager.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockEnrollmentRepository;
use crate::domain::{Capacity, Enrollment, ErrorCode};

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn pair() -> (StudentId, CourseId) {
    (StudentId::random(), CourseId::random())
}

fn make_service(
    repo: MockEnrollmentRepository,
    now: DateTime<Utc>,
) -> EnrollmentService<MockEnrollmentRepository> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    EnrollmentService::new(Arc::new(repo), Arc::new(clock))
}

fn enrollment(student_id: StudentId, course_id: CourseId, enrolled_at: DateTime<Utc>) -> Enrollment {
    Enrollment {
        student_id,
        course_id,
        enrolled_at,
    }
}

#[rstest]
#[tokio::test]
async fn enroll_reports_new_seat_with_clock_timestamp(
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat()
        .withf(move |s, c, at| *s == student_id && *c == course_id && *at == now)
        .times(1)
        .return_once(move |s, c, at| Ok(SeatClaim::Claimed(enrollment(*s, *c, at))));

    let outcome = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect("enroll succeeds");

    assert_eq!(
        outcome,
        EnrollOutcome::Enrolled(enrollment(student_id, course_id, now))
    );
}

#[rstest]
#[tokio::test]
async fn enroll_reports_existing_seat(now: DateTime<Utc>, pair: (StudentId, CourseId)) {
    let (student_id, course_id) = pair;
    let earlier = enrollment(student_id, course_id, now - chrono::Duration::days(3));
    let expected = earlier.clone();
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat()
        .times(1)
        .return_once(move |_, _, _| Ok(SeatClaim::Existing(earlier)));

    let outcome = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect("enroll succeeds");

    assert_eq!(outcome, EnrollOutcome::AlreadyEnrolled(expected));
}

#[rstest]
#[tokio::test]
async fn enroll_reports_full_course(now: DateTime<Utc>, pair: (StudentId, CourseId)) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat().times(1).return_once(|_, _, _| {
        Ok(SeatClaim::Full {
            capacity: Capacity::new(30),
            enrolled: 30,
        })
    });

    let outcome = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect("full course is not an error");

    assert_eq!(
        outcome,
        EnrollOutcome::CourseFull {
            capacity: Capacity::new(30)
        }
    );
}

#[rstest]
#[case(SeatClaim::CourseMissing)]
#[case(SeatClaim::StudentMissing)]
#[tokio::test]
async fn enroll_reports_missing_records_as_not_found(
    #[case] claim: SeatClaim,
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat()
        .times(1)
        .return_once(move |_, _, _| Ok(claim));

    let err = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect_err("missing record");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn duplicate_rejection_is_reported_as_already_enrolled(
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let winner = enrollment(student_id, course_id, now);
    let expected = winner.clone();
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat().times(1).return_once(|_, _, _| {
        Err(EnrollmentRepositoryError::duplicate_enrollment(
            "unique_student_course_enrollment",
        ))
    });
    repo.expect_find()
        .times(1)
        .return_once(move |_, _| Ok(Some(winner)));

    let outcome = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect("duplicate is absorbed");

    assert_eq!(outcome, EnrollOutcome::AlreadyEnrolled(expected));
}

#[rstest]
#[tokio::test]
async fn duplicate_with_vanished_row_retries_claim(
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    let mut sequence = mockall::Sequence::new();
    repo.expect_claim_seat()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_, _, _| Err(EnrollmentRepositoryError::duplicate_enrollment("race")));
    repo.expect_find()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_, _| Ok(None));
    repo.expect_claim_seat()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|s, c, at| Ok(SeatClaim::Claimed(enrollment(*s, *c, at))));

    let outcome = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect("retry succeeds");

    assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));
}

#[rstest]
#[tokio::test]
async fn persistent_duplicate_races_surface_as_conflict(
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat()
        .times(MAX_CLAIM_ATTEMPTS)
        .returning(|_, _, _| Err(EnrollmentRepositoryError::duplicate_enrollment("race")));
    repo.expect_find()
        .times(MAX_CLAIM_ATTEMPTS)
        .returning(|_, _| Ok(None));

    let err = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect_err("gives up");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(EnrollmentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(EnrollmentRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(EnrollmentRepositoryError::missing_reference("fk"), ErrorCode::NotFound)]
#[tokio::test]
async fn store_failures_map_to_domain_codes(
    #[case] failure: EnrollmentRepositoryError,
    #[case] expected: ErrorCode,
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_claim_seat()
        .times(1)
        .return_once(move |_, _, _| Err(failure));

    let err = make_service(repo, now)
        .enroll(&student_id, &course_id)
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(true, DropOutcome::Dropped)]
#[case(false, DropOutcome::NotEnrolled)]
#[tokio::test]
async fn drop_reports_whether_a_seat_was_released(
    #[case] removed: bool,
    #[case] expected: DropOutcome,
    now: DateTime<Utc>,
    pair: (StudentId, CourseId),
) {
    let (student_id, course_id) = pair;
    let mut repo = MockEnrollmentRepository::new();
    repo.expect_release_seat()
        .times(1)
        .return_once(move |_, _| Ok(removed));

    let outcome = make_service(repo, now)
        .drop_enrollment(&student_id, &course_id)
        .await
        .expect("drop succeeds");

    assert_eq!(outcome, expected);
}
