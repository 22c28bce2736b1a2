//! Driven port for the user store.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserRepositoryError {
        /// The backing document could not be read.
        Read { message: String } => "user store read failed: {message}",
        /// The backing document is neither a user list nor a `users` wrapper.
        Malformed { message: String } => "user store content is malformed: {message}",
        /// The updated list could not be persisted.
        Write { message: String } => "user store write failed: {message}",
    }
}

/// Persistence port for user records.
///
/// Adapters normalise whichever document shape they find into a plain list.
/// A missing store reads as empty (or as its template) and is never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every stored user.
    async fn load(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Replace the stored list with `users`.
    async fn save(&self, users: &[User]) -> Result<(), UserRepositoryError>;
}
