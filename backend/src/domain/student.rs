//! Student identity as seen by the enrollment domain.
//!
//! Authentication lives elsewhere. The registry mirrors just enough of each
//! account to enforce enrollment rules and staff-only course management.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum username length, in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length, in characters.
pub const USERNAME_MAX: usize = 32;
/// Maximum email length, in characters.
pub const EMAIL_MAX: usize = 254;

/// Validation errors for student registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Username shorter than [`USERNAME_MIN`].
    #[error("username must be at least {min} characters")]
    UsernameTooShort {
        /// Minimum permitted length.
        min: usize,
    },
    /// Username longer than [`USERNAME_MAX`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Username contains characters outside the permitted set.
    #[error("username may only contain letters, digits, '_', '.' or '-'")]
    UsernameInvalidCharacters,
    /// Email is not a plausible address.
    #[error("email must be a valid address of at most {max} characters")]
    InvalidEmail {
        /// Maximum permitted length.
        max: usize,
    },
}

impl StudentValidationError {
    /// Name of the request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail { .. } => "email",
            _ => "username",
        }
    }
}

/// Opaque stable student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique login name.
///
/// # Examples
/// ```
/// use course_enrollment::domain::Username;
///
/// assert!(Username::new("stu").is_ok());
/// assert!(Username::new("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(username: impl Into<String>) -> Result<Self, StudentValidationError> {
        let username = username.into();
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(StudentValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(StudentValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(StudentValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }

    /// Borrow the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered student or staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable identifier.
    pub id: StudentId,
    /// Unique login name.
    pub username: Username,
    /// Contact address, if known.
    pub email: Option<String>,
    /// Whether the account may manage courses.
    pub is_staff: bool,
}

impl Student {
    /// Whether this account may act on `target`'s behalf.
    #[must_use]
    pub fn may_act_for(&self, target: &StudentId) -> bool {
        self.is_staff || self.id == *target
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRegistration {
    /// Login name.
    pub username: Username,
    /// Optional contact address.
    pub email: Option<String>,
    /// Whether the account may manage courses.
    pub is_staff: bool,
}

impl StudentRegistration {
    /// Validate raw registration fields. A blank email counts as absent.
    pub fn new(
        username: impl Into<String>,
        email: Option<String>,
        is_staff: bool,
    ) -> Result<Self, StudentValidationError> {
        let username = Username::new(username)?;
        let email = email
            .map(|raw| raw.trim().to_owned())
            .filter(|trimmed| !trimmed.is_empty())
            .map(validate_email)
            .transpose()?;
        Ok(Self {
            username,
            email,
            is_staff,
        })
    }

    /// Materialise the registration as a student with the given identifier.
    #[must_use]
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            username: self.username,
            email: self.email,
            is_staff: self.is_staff,
        }
    }
}

fn validate_email(email: String) -> Result<String, StudentValidationError> {
    let invalid = StudentValidationError::InvalidEmail { max: EMAIL_MAX };
    if email.chars().count() > EMAIL_MAX {
        return Err(invalid);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(invalid),
    }
}
