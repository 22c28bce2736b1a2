//! Driving port for reading registered users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for listing users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user in store order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
