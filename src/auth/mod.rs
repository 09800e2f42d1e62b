//! Authentication
//!
//! Username/password login for the control protocol.

pub mod validator;

pub use validator::{validate_password, validate_user};
