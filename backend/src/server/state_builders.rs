//! Builders wiring repository adapters into the HTTP state and the seeder.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use course_enrollment::domain::ports::{CourseRepository, EnrollmentRepository, StudentRepository};
use course_enrollment::domain::{
    CatalogueSeed, CatalogueSeeder, CourseService, EnrollmentService, SeedReport, StudentService,
};
use course_enrollment::inbound::http::state::{HttpState, HttpStatePorts};
use course_enrollment::outbound::memory::InMemoryCampusStore;
use course_enrollment::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselEnrollmentRepository, DieselStudentRepository,
};

use super::ServerConfig;

/// Repository adapters chosen for this process.
pub(crate) enum Backend {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// The mutex-guarded in-memory store shared by every port.
    Memory(Arc<InMemoryCampusStore>),
}

impl Backend {
    pub(crate) fn from_config(config: &ServerConfig) -> Self {
        match &config.db_pool {
            Some(pool) => Self::Postgres(pool.clone()),
            None => Self::Memory(Arc::new(InMemoryCampusStore::new())),
        }
    }

    pub(crate) fn http_state(&self) -> HttpState {
        match self {
            Self::Postgres(pool) => wire_services(
                Arc::new(DieselCourseRepository::new(pool.clone())),
                Arc::new(DieselStudentRepository::new(pool.clone())),
                Arc::new(DieselEnrollmentRepository::new(pool.clone())),
            ),
            Self::Memory(store) => wire_services(store.clone(), store.clone(), store.clone()),
        }
    }

    pub(crate) async fn seed(&self) -> io::Result<SeedReport> {
        let seed = CatalogueSeed::default();
        let report = match self {
            Self::Postgres(pool) => {
                CatalogueSeeder::new(
                    Arc::new(DieselCourseRepository::new(pool.clone())),
                    Arc::new(DieselStudentRepository::new(pool.clone())),
                    clock(),
                )
                .seed_catalogue(&seed)
                .await
            }
            Self::Memory(store) => {
                CatalogueSeeder::new(store.clone(), store.clone(), clock())
                    .seed_catalogue(&seed)
                    .await
            }
        };
        report.map_err(|error| io::Error::other(format!("seed catalogue: {error}")))
    }
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}

fn wire_services<C, S, E>(courses: Arc<C>, students: Arc<S>, enrollments: Arc<E>) -> HttpState
where
    C: CourseRepository + 'static,
    S: StudentRepository + 'static,
    E: EnrollmentRepository + 'static,
{
    let course_service = Arc::new(CourseService::new(courses, students.clone(), clock()));
    let student_service = Arc::new(StudentService::new(students, enrollments.clone()));
    HttpState::new(HttpStatePorts {
        enrollments: Arc::new(EnrollmentService::new(enrollments, clock())),
        catalogue: course_service.clone(),
        course_admin: course_service,
        students: student_service.clone(),
        student_query: student_service,
    })
}
