//! Driving port for catalogue mutations.

use async_trait::async_trait;

use crate::domain::{Book, BookEdit, Error, NewBook};

/// Use-case port for adding, editing, and deleting books.
#[async_trait]
pub trait BooksCommand: Send + Sync {
    /// Append a book. Fails with `conflict` when the title is taken.
    async fn add_book(&self, book: NewBook) -> Result<Book, Error>;

    /// Edit the book currently titled `original_title`, keeping its owner.
    /// Fails with `not_found` when no such book exists.
    async fn update_book(&self, original_title: &str, edit: BookEdit) -> Result<Book, Error>;

    /// Delete every book titled `title`, subject to the delete spam guard.
    ///
    /// The guard is consulted before the title is validated, so a locked guard
    /// answers `too_many_requests` even for requests without a title.
    async fn delete_book(&self, title: Option<String>) -> Result<(), Error>;
}
