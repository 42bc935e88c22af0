//! Authentication Module
//!
//! This module handles user identity, registration, and session
//! management.
//!
//! # Module Structure
//!
//! - **`users`** - user model, the fixed role set, database operations
//! - **`sessions`** - token lifecycle: issue, validate, revoke
//! - **`handlers`** - HTTP handlers for signup, login, me, and logout
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email, password, role → user created → token returned
//! 2. **Login**: email and password verified → token returned
//! 3. **Logout**: token revoked in the session store
//!
//! Passwords are bcrypt-hashed before storage, tokens expire after 24
//! hours, and invalid credentials always answer 401 without detail.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserView};
pub use handlers::{get_me, login, logout, signup};
pub use sessions::SessionStore;
