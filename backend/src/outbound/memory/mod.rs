//! In-process store implementing every repository port.
//!
//! [`InMemoryCampusStore`] keeps students, courses, and enrollments behind one
//! mutex. Each port call holds the lock for its whole body, which makes
//! `claim_seat` atomic with respect to every other call on the same store.
//! Used when no database URL is configured and in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
    StudentRepository, StudentRepositoryError,
};
use crate::domain::{
    Course, CourseCode, CourseFilter, CourseId, CourseOverview, EnrolledCourse, Enrollment,
    SeatClaim, Student, StudentId, Username,
};

#[derive(Debug, Default)]
struct CampusState {
    students: HashMap<StudentId, Student>,
    courses: HashMap<CourseId, Course>,
    enrollments: BTreeMap<(StudentId, CourseId), DateTime<Utc>>,
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl CampusState {
    fn enrolled_count(&self, course_id: &CourseId) -> u32 {
        saturating_count(
            self.enrollments
                .keys()
                .filter(|(_, enrolled_course)| enrolled_course == course_id)
                .count(),
        )
    }

    fn overview(&self, course: &Course) -> CourseOverview {
        CourseOverview {
            course: course.clone(),
            enrolled_count: self.enrolled_count(&course.id),
        }
    }

    fn enrollment(&self, student_id: &StudentId, course_id: &CourseId) -> Option<Enrollment> {
        self.enrollments
            .get(&(*student_id, *course_id))
            .map(|enrolled_at| Enrollment {
                student_id: *student_id,
                course_id: *course_id,
                enrolled_at: *enrolled_at,
            })
    }

    fn code_taken_by_other(&self, course: &Course) -> bool {
        self.courses
            .values()
            .any(|existing| existing.code == course.code && existing.id != course.id)
    }
}

/// Mutex-guarded store for students, courses, and enrollments.
#[derive(Debug, Default)]
pub struct InMemoryCampusStore {
    state: Mutex<CampusState>,
}

impl InMemoryCampusStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation is a single map operation, so a poisoned guard still
    // holds consistent state.
    fn state(&self) -> MutexGuard<'_, CampusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StudentRepository for InMemoryCampusStore {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.state().students.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self
            .state()
            .students
            .values()
            .find(|student| student.username == *username)
            .cloned())
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut state = self.state();
        if state
            .students
            .values()
            .any(|existing| existing.username == student.username)
        {
            return Err(StudentRepositoryError::duplicate_username(
                student.username.as_str(),
            ));
        }
        state.students.insert(student.id, student.clone());
        Ok(())
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut state = self.state();
        let removed = state.students.remove(id).is_some();
        state
            .enrollments
            .retain(|(student_id, _), _| student_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCampusStore {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.state().courses.get(id).cloned())
    }

    async fn find_by_code(
        &self,
        code: &CourseCode,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self
            .state()
            .courses
            .values()
            .find(|course| course.code == *code)
            .cloned())
    }

    async fn overview(
        &self,
        id: &CourseId,
    ) -> Result<Option<CourseOverview>, CourseRepositoryError> {
        let state = self.state();
        Ok(state.courses.get(id).map(|course| state.overview(course)))
    }

    async fn list(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<CourseOverview>, CourseRepositoryError> {
        let state = self.state();
        let mut listed: Vec<CourseOverview> = state
            .courses
            .values()
            .filter(|course| filter.matches(course))
            .map(|course| state.overview(course))
            .collect();
        listed.sort_by(|a, b| a.course.code.cmp(&b.course.code));
        Ok(listed)
    }

    async fn semesters(&self) -> Result<Vec<String>, CourseRepositoryError> {
        let state = self.state();
        let mut semesters: Vec<String> = state
            .courses
            .values()
            .map(|course| course.semester.clone())
            .collect();
        semesters.sort();
        semesters.dedup();
        Ok(semesters)
    }

    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut state = self.state();
        if state.code_taken_by_other(course) {
            return Err(CourseRepositoryError::duplicate_code(course.code.as_str()));
        }
        state.courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut state = self.state();
        if state.code_taken_by_other(course) {
            return Err(CourseRepositoryError::duplicate_code(course.code.as_str()));
        }
        match state.courses.get_mut(&course.id) {
            Some(existing) => {
                *existing = Course {
                    created_at: existing.created_at,
                    ..course.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut state = self.state();
        let removed = state.courses.remove(id).is_some();
        state.enrollments.retain(|(_, course_id), _| course_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryCampusStore {
    async fn claim_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<SeatClaim, EnrollmentRepositoryError> {
        let mut state = self.state();
        if !state.students.contains_key(student_id) {
            return Ok(SeatClaim::StudentMissing);
        }
        let Some(capacity) = state.courses.get(course_id).map(|course| course.capacity) else {
            return Ok(SeatClaim::CourseMissing);
        };
        if let Some(existing) = state.enrollment(student_id, course_id) {
            return Ok(SeatClaim::Existing(existing));
        }
        let enrolled = state.enrolled_count(course_id);
        if !capacity.admits(enrolled) {
            return Ok(SeatClaim::Full { capacity, enrolled });
        }
        state
            .enrollments
            .insert((*student_id, *course_id), enrolled_at);
        Ok(SeatClaim::Claimed(Enrollment {
            student_id: *student_id,
            course_id: *course_id,
            enrolled_at,
        }))
    }

    async fn release_seat(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(self
            .state()
            .enrollments
            .remove(&(*student_id, *course_id))
            .is_some())
    }

    async fn find(
        &self,
        student_id: &StudentId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.state().enrollment(student_id, course_id))
    }

    async fn courses_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<EnrolledCourse>, EnrollmentRepositoryError> {
        let state = self.state();
        let mut schedule: Vec<EnrolledCourse> = state
            .enrollments
            .iter()
            .filter(|((enrolled_student, _), _)| enrolled_student == student_id)
            .filter_map(|((_, course_id), enrolled_at)| {
                state.courses.get(course_id).map(|course| EnrolledCourse {
                    course: course.clone(),
                    enrolled_at: *enrolled_at,
                })
            })
            .collect();
        schedule.sort_by(|a, b| {
            b.enrolled_at
                .cmp(&a.enrolled_at)
                .then_with(|| a.course.code.cmp(&b.course.code))
        });
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests;
