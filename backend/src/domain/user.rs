//! Registered library users.
//!
//! Users are stored verbatim, plaintext password included; there is no
//! authentication model behind them. Roles are whatever the client sends:
//! `admin` unlocks the admin actions in the browser client, anything else is
//! kept as supplied.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Client-supplied role controlling which actions the browser client offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    User,
    Admin,
    /// Any other value, preserved as written.
    Other(String),
}

impl Role {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }

    /// Whether the role grants the admin actions.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "user" => Self::User,
            "admin" => Self::Admin,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

/// Validation errors returned by [`User::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("missing required field: username")]
    MissingUsername,
    #[error("missing required field: password")]
    MissingPassword,
}

/// A registered user record.
///
/// Serialised as `{"username", "password", "role"}`. Missing keys in a
/// stored record read as empty strings and the `user` role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    username: String,
    password: String,
    role: Role,
}

impl User {
    /// Build a user from optional request parts.
    ///
    /// `username` and `password` must be present and non-blank. A missing
    /// or blank role defaults to [`Role::User`]; any other role is kept.
    ///
    /// # Examples
    /// ```
    /// use library_backend::domain::{Role, User};
    ///
    /// let user = User::try_from_parts(Some("ada"), Some("secret"), None).expect("valid user");
    /// assert_eq!(user.role(), &Role::User);
    /// ```
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let username = match username {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            _ => return Err(UserValidationError::MissingUsername),
        };
        let password = match password {
            Some(secret) if !secret.trim().is_empty() => secret.to_owned(),
            _ => return Err(UserValidationError::MissingPassword),
        };
        let role = role
            .filter(|raw| !raw.trim().is_empty())
            .map(Role::from)
            .unwrap_or_default();
        Ok(Self {
            username,
            password,
            role,
        })
    }

    /// Login name. Not guaranteed unique.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Assigned role.
    pub fn role(&self) -> &Role {
        &self.role
    }
}
