//! Auth Service Library
//!
//! Registration and credential checks on top of the users repository.

pub mod service;

pub use service::{AuthService, Authenticator, RegisterUserInput, RegisterUserOutput};
