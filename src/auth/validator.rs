//! Login validator
//!
//! Checks control protocol credentials against the `users` table from the
//! configuration.

use std::collections::HashMap;

use crate::error::AuthError;

const MAX_CREDENTIAL_LENGTH: usize = 128;

/// Rejects empty, oversized or control-character-bearing input.
fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty()
        && input.len() <= MAX_CREDENTIAL_LENGTH
        && !input.contains(['\r', '\n', '\0'])
}

/// Validates that the given username exists.
pub fn validate_user(username: &str, users: &HashMap<String, String>) -> Result<(), AuthError> {
    if !is_valid_input(username) {
        return Err(AuthError::MalformedInput("Invalid username format".into()));
    }

    if users.contains_key(username) {
        Ok(())
    } else {
        Err(AuthError::UserNotFound(username.to_string()))
    }
}

/// Validates the password stored for `username`.
pub fn validate_password(
    username: &str,
    password: &str,
    users: &HashMap<String, String>,
) -> Result<(), AuthError> {
    if !is_valid_input(password) {
        return Err(AuthError::MalformedInput("Invalid password format".into()));
    }

    match users.get(username) {
        Some(stored) if stored == password => Ok(()),
        Some(_) => Err(AuthError::InvalidPassword(username.to_string())),
        None => Err(AuthError::UserNotFound(username.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> HashMap<String, String> {
        HashMap::from([("alice".to_string(), "alice123".to_string())])
    }

    #[test]
    fn test_validate_user() {
        assert!(validate_user("alice", &users()).is_ok());
        assert!(matches!(
            validate_user("mallory", &users()),
            Err(AuthError::UserNotFound(_))
        ));
        assert!(matches!(
            validate_user("  ", &users()),
            Err(AuthError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("alice", "alice123", &users()).is_ok());
        assert!(matches!(
            validate_password("alice", "wrong", &users()),
            Err(AuthError::InvalidPassword(_))
        ));
        assert!(matches!(
            validate_password("alice", "a\0b", &users()),
            Err(AuthError::MalformedInput(_))
        ));
    }
}
