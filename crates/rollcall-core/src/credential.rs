// ABOUTME: Operator credential that guards the destructive attendance reset.
// ABOUTME: A plain shared-secret comparison; the values come from configuration, not code.

use std::fmt;

/// Username/password pair an operator must present before resetting the log.
#[derive(Clone, PartialEq, Eq)]
pub struct OperatorCredential {
    username: String,
    password: String,
}

impl OperatorCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// True when both the username and the password match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for OperatorCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
