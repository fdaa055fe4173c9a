//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Student accounts, including staff.
    students (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Optional contact address.
        email -> Nullable<Varchar>,
        /// Whether the account may manage courses.
        is_staff -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course catalogue.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique course code (max 20 characters).
        code -> Varchar,
        /// Display title (max 255 characters).
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Semester label (max 50 characters).
        semester -> Varchar,
        /// Credit hours, never negative.
        credits -> Int4,
        /// Seat limit; zero means unlimited.
        capacity -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (student, course) pair.
    ///
    /// The composite primary key is the
    /// `unique_student_course_enrollment` constraint.
    enrollments (student_id, course_id) {
        /// Enrolled student; cascades on delete.
        student_id -> Uuid,
        /// Course enrolled in; cascades on delete.
        course_id -> Uuid,
        /// When the seat was claimed.
        enrolled_at -> Timestamptz,
    }
}

diesel::joinable!(enrollments -> courses (course_id));
diesel::joinable!(enrollments -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(courses, enrollments, students);
