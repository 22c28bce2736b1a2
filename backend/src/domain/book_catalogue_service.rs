//! Book catalogue service implementing the book driving ports.
//!
//! Every mutation is a read-modify-write of the whole store document. A
//! per-service async mutex serialises those cycles so concurrent requests in
//! one process cannot overwrite each other's changes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::ports::{BookRepository, BookRepositoryError, BooksCommand, BooksQuery};
use crate::domain::{AttemptOutcome, Book, BookEdit, DeleteSpamGuard, Error, NewBook};

fn map_repository_error(err: BookRepositoryError) -> Error {
    error!(error = %err, "book store operation failed");
    Error::internal(err.to_string())
}

fn whole_seconds_rounded_up(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

/// Book service backed by a [`BookRepository`] and guarded by a shared
/// [`DeleteSpamGuard`].
pub struct BookCatalogueService<R> {
    repo: Arc<R>,
    delete_guard: Arc<DeleteSpamGuard>,
    write_lock: Mutex<()>,
}

impl<R> BookCatalogueService<R> {
    /// Create a service over `repo` using `delete_guard` for deletions.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use library_backend::domain::{BookCatalogueService, DeleteSpamGuard, SpamGuardPolicy};
    /// # use library_backend::domain::ports::BooksQuery;
    /// # use library_backend::outbound::persistence::JsonBookRepository;
    /// # use mockable::DefaultClock;
    /// # async fn example(repo: JsonBookRepository) -> Result<(), library_backend::domain::Error> {
    /// let guard = Arc::new(DeleteSpamGuard::new(SpamGuardPolicy::default(), Arc::new(DefaultClock)));
    /// let service = BookCatalogueService::new(Arc::new(repo), guard);
    /// let books = service.list_books().await?;
    /// # let _ = books;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(repo: Arc<R>, delete_guard: Arc<DeleteSpamGuard>) -> Self {
        Self {
            repo,
            delete_guard,
            write_lock: Mutex::new(()),
        }
    }

    fn rate_limited(&self) -> Error {
        let policy = self.delete_guard.policy();
        let retry_after = self
            .delete_guard
            .retry_after()
            .unwrap_or_else(|| policy.cooldown());
        Error::too_many_requests(policy.lock_message()).with_details(json!({
            "retryAfterSecs": whole_seconds_rounded_up(retry_after),
        }))
    }
}

fn missing_title() -> Error {
    Error::invalid_request("missing required field: title").with_details(json!({
        "field": "title",
        "code": "missing_field",
    }))
}

#[async_trait]
impl<R> BooksQuery for BookCatalogueService<R>
where
    R: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, Error> {
        self.repo.load().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> BooksCommand for BookCatalogueService<R>
where
    R: BookRepository,
{
    async fn add_book(&self, book: NewBook) -> Result<Book, Error> {
        let _write = self.write_lock.lock().await;
        let mut books = self.repo.load().await.map_err(map_repository_error)?;
        if books.iter().any(|existing| existing.has_title(book.title())) {
            return Err(Error::conflict("Book with same title already exists")
                .with_details(json!({ "title": book.title() })));
        }

        let book = Book::from(book);
        books.push(book.clone());
        self.repo.save(&books).await.map_err(map_repository_error)?;
        info!(title = book.title(), owner = book.user(), "book added");
        Ok(book)
    }

    async fn update_book(&self, original_title: &str, edit: BookEdit) -> Result<Book, Error> {
        let _write = self.write_lock.lock().await;
        let mut books = self.repo.load().await.map_err(map_repository_error)?;
        let Some(book) = books.iter_mut().find(|book| book.has_title(original_title)) else {
            return Err(Error::not_found("Book not found")
                .with_details(json!({ "title": original_title })));
        };

        book.apply(edit);
        let updated = book.clone();
        self.repo.save(&books).await.map_err(map_repository_error)?;
        info!(
            original_title,
            title = updated.title(),
            "book updated"
        );
        Ok(updated)
    }

    async fn delete_book(&self, title: Option<String>) -> Result<(), Error> {
        // Checked under the write lock so queued deletes see a trip made by
        // the attempt ahead of them.
        let _write = self.write_lock.lock().await;
        if self.delete_guard.is_locked() {
            warn!("delete refused while spam guard is locked");
            return Err(self.rate_limited());
        }
        let title = title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(missing_title)?;

        let mut books = self.repo.load().await.map_err(map_repository_error)?;
        let before = books.len();
        books.retain(|book| !book.has_title(&title));

        match self.delete_guard.register_attempt() {
            AttemptOutcome::Tripped { locked_until } => {
                warn!(%locked_until, "delete spam guard tripped");
            }
            AttemptOutcome::Recorded { .. } => {}
        }

        if books.len() == before {
            return Err(Error::not_found("book not found").with_details(json!({ "title": title })));
        }

        self.repo.save(&books).await.map_err(map_repository_error)?;
        info!(title = %title, removed = before - books.len(), "book deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "book_catalogue_service_tests.rs"]
mod tests;
