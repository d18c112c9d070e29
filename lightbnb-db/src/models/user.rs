//! User records and validated signup input

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::{check_text, ValidationError, MAX_VARCHAR_LEN};

/// Loose shape check: something@something.tld, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored as supplied; hashing happens before it reaches this layer.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::Email;
    ///
    /// assert!(Email::new("tristanjacobs@gmail.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if s.len() > MAX_VARCHAR_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_VARCHAR_LEN,
            });
        }

        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
}

impl NewUser {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        check_text("name", name)?;
        let email = Email::new(email)?;
        check_text("password", password)?;

        Ok(Self {
            name: name.trim().to_owned(),
            email,
            password: password.to_owned(),
        })
    }
}
