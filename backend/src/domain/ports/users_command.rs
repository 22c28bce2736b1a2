//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for user registration.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Append `user` and return the full updated list. Usernames are not
    /// checked for uniqueness.
    async fn add_user(&self, user: User) -> Result<Vec<User>, Error>;
}
