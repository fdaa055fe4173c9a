//! Course catalogue data model.
//!
//! A course carries a unique short `code`, descriptive fields, a credit value
//! and a seat [`Capacity`]. Enrollment counts are derived from the store and
//! travel alongside the course in [`CourseOverview`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a course code, in characters.
pub const COURSE_CODE_MAX: usize = 20;
/// Maximum length of a course title, in characters.
pub const COURSE_TITLE_MAX: usize = 255;
/// Maximum length of a semester label, in characters.
pub const SEMESTER_MAX: usize = 50;
/// Largest credit value or seat ceiling a course may carry. Both are stored
/// as PostgreSQL `INTEGER` columns.
pub const COURSE_NUMBER_MAX: u32 = i32::MAX.unsigned_abs();

/// Validation errors raised while building course values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// The course code was blank.
    #[error("course code must not be empty")]
    EmptyCode,
    /// The course code exceeded [`COURSE_CODE_MAX`].
    #[error("course code must be at most {max} characters")]
    CodeTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The title was blank.
    #[error("course title must not be empty")]
    EmptyTitle,
    /// The title exceeded [`COURSE_TITLE_MAX`].
    #[error("course title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The semester label was blank.
    #[error("semester must not be empty")]
    EmptySemester,
    /// The semester label exceeded [`SEMESTER_MAX`].
    #[error("semester must be at most {max} characters")]
    SemesterTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The credit value exceeded [`COURSE_NUMBER_MAX`].
    #[error("credits must be at most {max}")]
    CreditsTooLarge {
        /// Maximum permitted value.
        max: u32,
    },
    /// The seat ceiling exceeded [`COURSE_NUMBER_MAX`].
    #[error("capacity must be at most {max}")]
    CapacityTooLarge {
        /// Maximum permitted value.
        max: u32,
    },
}

impl CourseValidationError {
    /// Name of the request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyCode | Self::CodeTooLong { .. } => "code",
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptySemester | Self::SemesterTooLong { .. } => "semester",
            Self::CreditsTooLarge { .. } => "credits",
            Self::CapacityTooLarge { .. } => "capacity",
        }
    }
}

/// Stable course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
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

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn bounded_text(
    value: String,
    max: usize,
    empty: CourseValidationError,
    too_long: CourseValidationError,
) -> Result<String, CourseValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Short unique course code such as `CS101`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Validate and construct a course code. Surrounding whitespace is removed.
    ///
    /// # Examples
    /// ```
    /// use course_enrollment::domain::CourseCode;
    ///
    /// let code = CourseCode::new(" CS101 ").expect("valid code");
    /// assert_eq!(code.as_str(), "CS101");
    /// assert!(CourseCode::new("").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self, CourseValidationError> {
        bounded_text(
            code.into(),
            COURSE_CODE_MAX,
            CourseValidationError::EmptyCode,
            CourseValidationError::CodeTooLong {
                max: COURSE_CODE_MAX,
            },
        )
        .map(Self)
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CourseCode> for String {
    fn from(value: CourseCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseCode {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Seat ceiling for a course. Zero means the course is unlimited.
///
/// # Examples
/// ```
/// use course_enrollment::domain::{Capacity, SeatsRemaining};
///
/// let capacity = Capacity::new(2);
/// assert!(capacity.admits(1));
/// assert!(!capacity.admits(2));
/// assert_eq!(capacity.seats_remaining(5), SeatsRemaining::Limited(0));
/// assert_eq!(Capacity::UNLIMITED.seats_remaining(500), SeatsRemaining::Unlimited);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// A course without a seat ceiling.
    pub const UNLIMITED: Self = Self(0);

    /// Wrap a raw seat count.
    #[must_use]
    pub const fn new(seats: u32) -> Self {
        Self(seats)
    }

    /// Raw seat count as stored. Zero for unlimited courses.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether the course has no seat ceiling.
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        self.0 == 0
    }

    /// Whether one more student may enroll when `enrolled` already hold seats.
    #[must_use]
    pub const fn admits(self, enrolled: u32) -> bool {
        self.is_unlimited() || enrolled < self.0
    }

    /// Seats left once `enrolled` students hold a place, floored at zero.
    #[must_use]
    pub const fn seats_remaining(self, enrolled: u32) -> SeatsRemaining {
        if self.is_unlimited() {
            SeatsRemaining::Unlimited
        } else {
            SeatsRemaining::Limited(self.0.saturating_sub(enrolled))
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            f.write_str("unlimited")
        } else {
            self.0.fmt(f)
        }
    }
}

/// Derived count of open seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "seats")]
pub enum SeatsRemaining {
    /// A limited course with this many open seats.
    Limited(u32),
    /// The course has no seat ceiling.
    Unlimited,
}

impl SeatsRemaining {
    /// Open seats as a number, `None` for unlimited courses.
    #[must_use]
    pub const fn as_limited(self) -> Option<u32> {
        match self {
            Self::Limited(seats) => Some(seats),
            Self::Unlimited => None,
        }
    }
}

/// Persisted course record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable identifier.
    pub id: CourseId,
    /// Unique short code.
    pub code: CourseCode,
    /// Display title.
    pub title: String,
    /// Free-form description. May be empty.
    pub description: String,
    /// Semester label, for example `Fall 2025`.
    pub semester: String,
    /// Credit value.
    pub credits: u32,
    /// Seat ceiling.
    pub capacity: Capacity,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Build a new course from a validated draft.
    #[must_use]
    pub fn from_draft(id: CourseId, draft: CourseDraft, created_at: DateTime<Utc>) -> Self {
        let CourseDraft {
            code,
            title,
            description,
            semester,
            credits,
            capacity,
        } = draft;
        Self {
            id,
            code,
            title,
            description,
            semester,
            credits,
            capacity,
            created_at,
        }
    }

    /// Replace the editable fields with those from `draft`.
    #[must_use]
    pub fn with_draft(self, draft: CourseDraft) -> Self {
        Self::from_draft(self.id, draft, self.created_at)
    }
}

/// Validated input for creating or editing a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    /// Unique short code.
    pub code: CourseCode,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Semester label.
    pub semester: String,
    /// Credit value.
    pub credits: u32,
    /// Seat ceiling.
    pub capacity: Capacity,
}

/// Raw course fields awaiting validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFields {
    /// Proposed code.
    pub code: String,
    /// Proposed title.
    pub title: String,
    /// Proposed description.
    pub description: String,
    /// Proposed semester label.
    pub semester: String,
    /// Proposed credit value.
    pub credits: u32,
    /// Proposed seat ceiling. Zero means unlimited.
    pub capacity: u32,
}

impl TryFrom<CourseFields> for CourseDraft {
    type Error = CourseValidationError;

    fn try_from(fields: CourseFields) -> Result<Self, Self::Error> {
        let code = CourseCode::new(fields.code)?;
        let title = bounded_text(
            fields.title,
            COURSE_TITLE_MAX,
            CourseValidationError::EmptyTitle,
            CourseValidationError::TitleTooLong {
                max: COURSE_TITLE_MAX,
            },
        )?;
        let semester = bounded_text(
            fields.semester,
            SEMESTER_MAX,
            CourseValidationError::EmptySemester,
            CourseValidationError::SemesterTooLong { max: SEMESTER_MAX },
        )?;
        if fields.credits > COURSE_NUMBER_MAX {
            return Err(CourseValidationError::CreditsTooLarge {
                max: COURSE_NUMBER_MAX,
            });
        }
        if fields.capacity > COURSE_NUMBER_MAX {
            return Err(CourseValidationError::CapacityTooLarge {
                max: COURSE_NUMBER_MAX,
            });
        }
        Ok(Self {
            code,
            title,
            description: fields.description.trim().to_owned(),
            semester,
            credits: fields.credits,
            capacity: Capacity::new(fields.capacity),
        })
    }
}

/// A course together with its live enrollment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOverview {
    /// The course record.
    pub course: Course,
    /// Number of enrollments currently referencing the course.
    pub enrolled_count: u32,
}

impl CourseOverview {
    /// Open seats derived from capacity and the live count.
    #[must_use]
    pub const fn seats_remaining(&self) -> SeatsRemaining {
        self.course.capacity.seats_remaining(self.enrolled_count)
    }
}

/// Catalogue listing filter. Blank values are treated as absent.
///
/// # Examples
/// ```
/// use course_enrollment::domain::CourseFilter;
///
/// let filter = CourseFilter::new(Some("Fall 2025".into()), Some("  ".into()));
/// assert_eq!(filter.semester(), Some("Fall 2025"));
/// assert!(filter.search().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    semester: Option<String>,
    search: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl CourseFilter {
    /// Build a filter from optional semester and search terms.
    #[must_use]
    pub fn new(semester: Option<String>, search: Option<String>) -> Self {
        Self {
            semester: non_blank(semester),
            search: non_blank(search),
        }
    }

    /// Exact semester label to match.
    #[must_use]
    pub fn semester(&self) -> Option<&str> {
        self.semester.as_deref()
    }

    /// Case-insensitive substring matched against code, title and semester.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether `course` satisfies this filter.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let semester_ok = self
            .semester()
            .is_none_or(|semester| course.semester == semester);
        let search_ok = self.search().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            [course.code.as_str(), course.title.as_str(), course.semester.as_str()]
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
        });
        semester_ok && search_ok
    }
}
