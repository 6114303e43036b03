use serde::{Deserialize, Serialize};

/// One administrator row of the roster file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AdminRecord {
    pub username: String,
    pub email: String,
    pub password: String, // Stored as submitted, no hashing
    pub role: String,
    #[serde(default)]
    pub created: String,
}

impl AdminRecord {
    pub const FIELDS: [&'static str; 5] = ["username", "email", "password", "role", "created"];

    /// Value of a column by its header name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => Some(&self.username),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            "role" => Some(&self.role),
            "created" => Some(&self.created),
            _ => None,
        }
    }
}
