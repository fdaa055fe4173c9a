//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseAdminCommand, CourseCatalogueQuery, EnrollmentCommand, StudentCommand, StudentQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Enroll and drop.
    pub enrollments: Arc<dyn EnrollmentCommand>,
    /// Catalogue reads.
    pub catalogue: Arc<dyn CourseCatalogueQuery>,
    /// Staff course management.
    pub course_admin: Arc<dyn CourseAdminCommand>,
    /// Registration and account removal.
    pub students: Arc<dyn StudentCommand>,
    /// Account and schedule reads.
    pub student_query: Arc<dyn StudentQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Enroll and drop.
    pub enrollments: Arc<dyn EnrollmentCommand>,
    /// Catalogue reads.
    pub catalogue: Arc<dyn CourseCatalogueQuery>,
    /// Staff course management.
    pub course_admin: Arc<dyn CourseAdminCommand>,
    /// Registration and account removal.
    pub students: Arc<dyn StudentCommand>,
    /// Account and schedule reads.
    pub student_query: Arc<dyn StudentQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use course_enrollment::domain::{CourseService, EnrollmentService, StudentService};
    /// use course_enrollment::inbound::http::state::{HttpState, HttpStatePorts};
    /// use course_enrollment::outbound::memory::InMemoryCampusStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryCampusStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let courses = Arc::new(CourseService::new(store.clone(), store.clone(), clock.clone()));
    /// let students = Arc::new(StudentService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     enrollments: Arc::new(EnrollmentService::new(store, clock)),
    ///     catalogue: courses.clone(),
    ///     course_admin: courses,
    ///     students: students.clone(),
    ///     student_query: students,
    /// });
    /// let _catalogue = state.catalogue.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            enrollments,
            catalogue,
            course_admin,
            students,
            student_query,
        } = ports;
        Self {
            enrollments,
            catalogue,
            course_admin,
            students,
            student_query,
        }
    }
}
