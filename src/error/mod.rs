//! Error Handling
//!
//! This module defines the error taxonomy used across the API and its
//! conversion into HTTP responses.
//!
//! # Error Categories
//!
//! - `NotFound` - a referenced checklist, item, user, or membership does not exist
//! - `Forbidden` - the actor is authenticated but the policy denies the operation
//! - `InvalidInput` - missing field, bad enum value, or a non-member assignee
//! - `Unauthorized` - missing or invalid bearer token
//! - `Storage` - the persistence layer failed; surfaced as a generic server error
//!
//! Assignment collisions are deliberately *not* an error: they are logged
//! as conflict alerts while the operation proceeds.

pub mod conversion;
pub mod types;

pub use types::ApiError;
