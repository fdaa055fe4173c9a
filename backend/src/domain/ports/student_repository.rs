//! Port for the student registry store.

use async_trait::async_trait;

use crate::domain::{Student, StudentId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// Another account already uses this username.
        DuplicateUsername { username: String } =>
            "username already exists: {username}",
    }
}

/// Port for student account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Fetch a student by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Insert a new account.
    ///
    /// Fails with [`StudentRepositoryError::DuplicateUsername`] when taken.
    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError>;

    /// Delete an account and, by cascade, its enrollments.
    ///
    /// Returns `false` when no account had the identifier.
    async fn delete(&self, id: &StudentId) -> Result<bool, StudentRepositoryError>;
}
