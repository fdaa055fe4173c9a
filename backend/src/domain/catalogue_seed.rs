//! Default catalogue seeding.
//!
//! [`CatalogueSeeder`] upserts a [`CatalogueSeed`] through the repository
//! ports: courses are matched by code and rewritten in place, accounts are
//! inserted only when their username is still free. Running the seeder twice
//! leaves the store unchanged.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::actor::map_student_repository_error;
use crate::domain::course_service::map_course_repository_error;
use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, StudentRepository, StudentRepositoryError,
};
use crate::domain::{
    Course, CourseDraft, CourseFields, CourseId, Error, StudentId, StudentRegistration, Username,
};

/// One seed course as static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCourse {
    /// Unique course code, e.g. `CS101`.
    pub code: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Free-form description.
    pub description: &'static str,
    /// Semester label.
    pub semester: &'static str,
    /// Credit hours.
    pub credits: u32,
    /// Seat limit; zero means unlimited.
    pub capacity: u32,
}

/// One seed account as static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAccount {
    /// Login name.
    pub username: &'static str,
    /// Contact address.
    pub email: &'static str,
    /// Whether the account manages courses.
    pub is_staff: bool,
}

const fn course(
    code: &'static str,
    title: &'static str,
    description: &'static str,
    semester: &'static str,
    credits: u32,
    capacity: u32,
) -> SeedCourse {
    SeedCourse {
        code,
        title,
        description,
        semester,
        credits,
        capacity,
    }
}

const FALL_2025: &str = "Fall 2025";
const SPRING_2026: &str = "Spring 2026";

const DEFAULT_COURSES: [SeedCourse; 15] = [
    course("CS101", "Intro to Programming", "Fundamentals of coding with Python, variables, loops, and functions.", FALL_2025, 3, 40),
    course("CS102", "Data Structures", "Arrays, stacks, queues, linked lists, trees, graphs, and complexity.", FALL_2025, 3, 35),
    course("CS103", "Databases", "Relational modeling, SQL, indexing, and transactions.", SPRING_2026, 3, 35),
    course("CS104", "Web Development", "Frontend basics with HTML/CSS/JS and backend service patterns.", SPRING_2026, 3, 30),
    course("CS105", "Algorithms", "Design techniques, sorting, searching, greedy, DP, and graph algorithms.", FALL_2025, 3, 35),
    course("CS106", "Operating Systems", "Processes, threads, synchronization, memory, and file systems.", SPRING_2026, 4, 30),
    course("CS107", "Networks", "TCP/IP, routing, HTTP, and basic security concepts.", SPRING_2026, 3, 30),
    course("CS108", "Software Engineering", "Requirements, design patterns, testing, CI/CD, and agile practices.", FALL_2025, 3, 40),
    course("CS109", "Cloud Computing", "Compute, storage, containers, and deployment fundamentals.", SPRING_2026, 3, 30),
    course("CS110", "Mobile Development", "Building mobile apps with responsive design principles.", FALL_2025, 3, 25),
    course("CS111", "AI Fundamentals", "Search, classification, regression, and model evaluation.", SPRING_2026, 3, 30),
    course("CS112", "Cybersecurity Basics", "Threats, encryption, authentication, and secure coding.", FALL_2025, 3, 30),
    course("CS113", "Human-Computer Interaction", "Designing usable and accessible interfaces.", SPRING_2026, 3, 25),
    course("CS114", "Data Visualization", "Telling stories with data using plots and dashboards.", FALL_2025, 3, 25),
    course("CS115", "DevOps Practices", "Version control, CI/CD, monitoring, and observability.", SPRING_2026, 3, 30),
];

const DEFAULT_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        username: "stu",
        email: "stu@example.com",
        is_staff: false,
    },
    SeedAccount {
        username: "adm",
        email: "adm@example.com",
        is_staff: true,
    },
];

/// Courses and accounts to load into an empty or existing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueSeed {
    courses: Vec<SeedCourse>,
    accounts: Vec<SeedAccount>,
}

impl Default for CatalogueSeed {
    fn default() -> Self {
        Self::new(DEFAULT_COURSES.to_vec(), DEFAULT_ACCOUNTS.to_vec())
    }
}

impl CatalogueSeed {
    /// Build a seed from explicit course and account lists.
    #[must_use]
    pub fn new(courses: Vec<SeedCourse>, accounts: Vec<SeedAccount>) -> Self {
        Self { courses, accounts }
    }

    /// Seed courses in declaration order.
    #[must_use]
    pub fn courses(&self) -> &[SeedCourse] {
        &self.courses
    }

    /// Seed accounts in declaration order.
    #[must_use]
    pub fn accounts(&self) -> &[SeedAccount] {
        &self.accounts
    }
}

/// Counts reported by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Courses inserted because their code was new.
    pub courses_created: usize,
    /// Existing courses rewritten from the seed.
    pub courses_updated: usize,
    /// Accounts inserted because their username was free.
    pub accounts_created: usize,
}

fn invalid_seed(reference: &str, field: &str, message: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("seed entry {reference} is invalid: {message}"))
        .with_details(json!({ "entry": reference, "field": field }))
}

fn draft_for(seed: &SeedCourse) -> Result<CourseDraft, Error> {
    CourseDraft::try_from(CourseFields {
        code: seed.code.to_owned(),
        title: seed.title.to_owned(),
        description: seed.description.to_owned(),
        semester: seed.semester.to_owned(),
        credits: seed.credits,
        capacity: seed.capacity,
    })
    .map_err(|err| invalid_seed(seed.code, err.field(), &err))
}

fn registration_for(seed: &SeedAccount) -> Result<StudentRegistration, Error> {
    StudentRegistration::new(seed.username, Some(seed.email.to_owned()), seed.is_staff)
        .map_err(|err| invalid_seed(seed.username, err.field(), &err))
}

/// Applies a [`CatalogueSeed`] through the repository ports.
#[derive(Clone)]
pub struct CatalogueSeeder<C, S> {
    courses: Arc<C>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
}

enum Upsert {
    Created,
    Updated,
}

impl<C, S> CatalogueSeeder<C, S>
where
    C: CourseRepository,
    S: StudentRepository,
{
    /// Create a seeder over the given stores.
    pub fn new(courses: Arc<C>, students: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            students,
            clock,
        }
    }

    /// Upsert every course and insert every missing account in `seed`.
    ///
    /// All entries are validated before the store is touched, so a bad seed
    /// writes nothing.
    pub async fn seed_catalogue(&self, seed: &CatalogueSeed) -> Result<SeedReport, Error> {
        let drafts = seed
            .courses()
            .iter()
            .map(draft_for)
            .collect::<Result<Vec<_>, _>>()?;
        let registrations = seed
            .accounts()
            .iter()
            .map(registration_for)
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = SeedReport::default();
        for draft in drafts {
            match self.upsert_course(draft).await? {
                Upsert::Created => report.courses_created += 1,
                Upsert::Updated => report.courses_updated += 1,
            }
        }
        for registration in registrations {
            if self.insert_account_if_absent(registration).await? {
                report.accounts_created += 1;
            }
        }

        info!(
            courses_created = report.courses_created,
            courses_updated = report.courses_updated,
            accounts_created = report.accounts_created,
            "catalogue seeded"
        );
        Ok(report)
    }

    async fn upsert_course(&self, draft: CourseDraft) -> Result<Upsert, Error> {
        if let Some(existing) = self.find_course(&draft).await? {
            return self.rewrite_course(existing, draft).await;
        }
        let course = Course::from_draft(CourseId::random(), draft.clone(), self.clock.utc());
        match self.courses.insert(&course).await {
            Ok(()) => {
                debug!(code = %course.code, "seed course created");
                Ok(Upsert::Created)
            }
            Err(CourseRepositoryError::DuplicateCode { code }) => {
                // Lost a race with another writer; fall back to updating its row.
                let existing = self.find_course(&draft).await?.ok_or_else(|| {
                    Error::conflict(format!("course code {code} changed during seeding"))
                })?;
                self.rewrite_course(existing, draft).await
            }
            Err(err) => Err(map_course_repository_error(err)),
        }
    }

    async fn find_course(&self, draft: &CourseDraft) -> Result<Option<Course>, Error> {
        self.courses
            .find_by_code(&draft.code)
            .await
            .map_err(map_course_repository_error)
    }

    async fn rewrite_course(&self, existing: Course, draft: CourseDraft) -> Result<Upsert, Error> {
        let course_id = existing.id;
        let updated = existing.with_draft(draft);
        let found = self
            .courses
            .update(&updated)
            .await
            .map_err(map_course_repository_error)?;
        if !found {
            return Err(Error::conflict(format!(
                "course {course_id} was removed during seeding"
            )));
        }
        debug!(code = %updated.code, "seed course updated");
        Ok(Upsert::Updated)
    }

    async fn insert_account_if_absent(
        &self,
        registration: StudentRegistration,
    ) -> Result<bool, Error> {
        if self.username_taken(&registration.username).await? {
            return Ok(false);
        }
        let student = registration.into_student(StudentId::random());
        match self.students.insert(&student).await {
            Ok(()) => {
                debug!(username = %student.username, "seed account created");
                Ok(true)
            }
            Err(StudentRepositoryError::DuplicateUsername { .. }) => Ok(false),
            Err(err) => Err(map_student_repository_error(err)),
        }
    }

    async fn username_taken(&self, username: &Username) -> Result<bool, Error> {
        Ok(self
            .students
            .find_by_username(username)
            .await
            .map_err(map_student_repository_error)?
            .is_some())
    }
}
