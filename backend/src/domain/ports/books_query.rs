//! Driving port for reading the catalogue.

use async_trait::async_trait;

use crate::domain::{Book, Error};

/// Use-case port for listing books.
#[async_trait]
pub trait BooksQuery: Send + Sync {
    /// Return every book in store order.
    async fn list_books(&self) -> Result<Vec<Book>, Error>;
}
