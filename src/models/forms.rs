use serde::Deserialize;
use super::admin::AdminRecord;

// Body of POST /save_admin. Every field is optional on the wire so that
// presence can be reported as a validation error instead of a JSON rejection.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub created: Option<String>,
}

impl AdminForm {
    /// Builds the record to store, or `None` when a required field is absent or empty.
    pub fn into_record(self) -> Option<AdminRecord> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Some(AdminRecord {
            username: required(self.username)?,
            email: required(self.email)?,
            password: required(self.password)?,
            role: required(self.role)?,
            created: self.created.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, role: &str) -> AdminForm {
        AdminForm {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            role: Some(role.into()),
            created: None,
        }
    }

    #[test]
    fn test_complete_form_defaults_created_to_empty() {
        let record = form("alice", "a@x.com", "p", "admin").into_record().unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.created, "");
    }

    #[test]
    fn test_empty_or_missing_required_field_is_rejected() {
        assert!(form("", "a@x.com", "p", "admin").into_record().is_none());
        assert!(form("alice", "a@x.com", "p", "").into_record().is_none());

        let mut missing_email = form("alice", "a@x.com", "p", "admin");
        missing_email.email = None;
        assert!(missing_email.into_record().is_none());
    }

    #[test]
    fn test_form_deserializes_partial_json() {
        let form: AdminForm = serde_json::from_str(r#"{"username":"bob","created":"2024-01-01"}"#).unwrap();
        assert_eq!(form.username.as_deref(), Some("bob"));
        assert_eq!(form.created.as_deref(), Some("2024-01-01"));
        assert!(form.into_record().is_none());
    }
}
