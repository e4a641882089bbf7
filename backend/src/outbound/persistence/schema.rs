//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts.
    ///
    /// Only `id`, `username`, `display_name` and `token` are read by the
    /// search backend; the remaining columns belong to account management.
    users (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Unique handle (max 30 characters).
        username -> Varchar,
        /// Human-readable name (max 50 characters).
        display_name -> Varchar,
        /// Contact address.
        email -> Varchar,
        /// Password hash.
        hash -> Varchar,
        /// Current access token, if the account is signed in.
        token -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges. The composite key keeps edges unique.
    follows (follower_id, followed_id) {
        /// Account doing the following.
        follower_id -> Int8,
        /// Account being followed.
        followed_id -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, follows);
