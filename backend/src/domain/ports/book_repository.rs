//! Driven port for the book store.
//!
//! The store is a whole-document collection: adapters load every record and
//! save the full list back. Domain services own the read-modify-write cycle.

use async_trait::async_trait;

use crate::domain::Book;

use super::define_port_error;

define_port_error! {
    /// Failures raised by book store adapters.
    pub enum BookRepositoryError {
        /// The backing document could not be read or seeded.
        Read { message: String } => "book store read failed: {message}",
        /// The backing document is not a valid book list.
        Malformed { message: String } => "book store content is malformed: {message}",
        /// The updated list could not be persisted.
        Write { message: String } => "book store write failed: {message}",
    }
}

/// Persistence port for book records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Load every stored book, seeding the store first when it does not exist.
    async fn load(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// Replace the stored list with `books`.
    async fn save(&self, books: &[Book]) -> Result<(), BookRepositoryError>;
}
