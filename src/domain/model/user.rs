use super::ValidateDraft;
use crate::domain::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    #[schema(value_type = i64)]
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    /// Users this user has added (outgoing edges only).
    #[schema(value_type = Vec<i64>)]
    pub friends: BTreeSet<UserId>,
}

/// Client-settable part of a user, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl UserDraft {
    /// The name that gets stored: the login stands in for a blank or absent name.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }

    /// Returns the draft with the display-name substitution applied.
    pub fn normalized(mut self) -> Self {
        let name = self.display_name().to_string();
        self.name = Some(name);
        self
    }
}

impl ValidateDraft for UserDraft {
    fn validate(&self, today: NaiveDate) -> CoreResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CoreError::validation("email must be a non-blank address containing '@'"));
        }
        if self.login.is_empty() || self.login.chars().any(char::is_whitespace) {
            return Err(CoreError::validation("login must be non-blank and contain no whitespace"));
        }
        if self.birthday > today {
            return Err(CoreError::validation("birthday must not be in the future"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: Option<&str>) -> UserDraft {
        UserDraft {
            email: "neo@matrix.io".to_string(),
            login: "neo".to_string(),
            name: name.map(str::to_string),
            birthday: NaiveDate::from_ymd_opt(1990, 3, 31).unwrap(),
        }
    }

    #[test]
    fn blank_or_absent_name_falls_back_to_login() {
        assert_eq!(draft(None).display_name(), "neo");
        assert_eq!(draft(Some("")).display_name(), "neo");
        assert_eq!(draft(Some("  \t")).display_name(), "neo");
        assert_eq!(draft(Some("Thomas")).display_name(), "Thomas");
        assert_eq!(draft(None).normalized().name.as_deref(), Some("neo"));
    }

    #[test]
    fn login_with_whitespace_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut d = draft(None);
        assert!(d.validate(today).is_ok());
        d.login = "the one".to_string();
        assert!(d.validate(today).unwrap_err().is_validation());
    }

    #[test]
    fn future_birthday_is_rejected() {
        let today = NaiveDate::from_ymd_opt(1990, 3, 30).unwrap();
        assert!(draft(None).validate(today).is_err());
    }
}
