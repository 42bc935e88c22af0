//! HTTP handlers for authentication endpoints

pub mod login;
pub mod logout;
pub mod me;
pub mod signup;
pub mod types;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use signup::signup;
