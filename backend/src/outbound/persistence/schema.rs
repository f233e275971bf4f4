//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `username` carries the `users_username_key` unique
    /// constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed username (max 64 characters).
        username -> Varchar,
        /// Record creation timestamp; defines listing order.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Exercises logged against users. No foreign key to `users`.
    exercises (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Identity column giving the insertion order.
        sequence -> Int8,
        user_id -> Uuid,
        description -> Text,
        duration_minutes -> Int4,
        exercise_date -> Date,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, exercises);
