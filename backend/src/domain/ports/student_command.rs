//! Driving port for account registration and removal.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId, StudentRegistration};

/// Student registry mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `conflict` when the username is taken.
    async fn register_student(&self, registration: StudentRegistration) -> Result<Student, Error>;

    /// Delete an account and its enrollments. Allowed for the account itself
    /// or for staff.
    async fn delete_student(&self, actor: &StudentId, student_id: &StudentId)
    -> Result<(), Error>;
}
