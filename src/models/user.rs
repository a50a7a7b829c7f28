use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub type UserId = i64;

/// A registered user as stored and returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// User fields supplied on create, and on full-record update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Full replacement of an existing user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: UserId,
    #[serde(flatten)]
    pub fields: NewUser,
}

impl NewUser {
    /// Checks every field, with `today` as the upper bound for the birthday.
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        if self.login.is_empty() {
            return Err(AppError::invalid("login must not be empty"));
        }
        if self.login.chars().any(char::is_whitespace) {
            return Err(AppError::invalid("login must not contain whitespace"));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::invalid(format!(
                "email '{}' is not a valid address",
                self.email
            )));
        }
        if self.birthday > today {
            return Err(AppError::invalid("birthday must not be in the future"));
        }
        Ok(())
    }

    /// The name shown for the user: the login when no name was given.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.login.clone(),
        }
    }

    pub fn into_user(self, id: UserId) -> User {
        let name = self.display_name();
        User {
            id,
            email: self.email,
            login: self.login,
            name,
            birthday: self.birthday,
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}
