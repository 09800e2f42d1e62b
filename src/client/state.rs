//! Module `state`
//!
//! Per-connection login state. This lives in the session task only; the file
//! handlers never see it.

/// Login progress and pending rename of one control connection.
#[derive(Debug, Default)]
pub struct Client {
    username: Option<String>,
    is_user_valid: bool,
    is_logged_in: bool,
    rename_from: Option<String>,
}

impl Client {
    pub fn is_user_valid(&self) -> bool {
        self.is_user_valid
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Record the outcome of a USER command. Always drops any previous login.
    pub fn set_user(&mut self, username: Option<String>) {
        self.is_user_valid = username.is_some();
        self.username = username;
        self.is_logged_in = false;
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.is_logged_in = logged_in;
    }

    pub fn set_rename_from(&mut self, path: Option<String>) {
        self.rename_from = path;
    }

    pub fn take_rename_from(&mut self) -> Option<String> {
        self.rename_from.take()
    }
}
