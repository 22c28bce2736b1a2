//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BooksCommand, BooksQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub books: Arc<dyn BooksQuery>,
    pub books_command: Arc<dyn BooksCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

/// Parameter object bundling the port implementations for [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub books: Arc<dyn BooksQuery>,
    pub books_command: Arc<dyn BooksCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// A single service usually backs both the query and the command port, so
    /// the same `Arc` is cloned into each field.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use library_backend::domain::{
    ///     BookCatalogueService, DeleteSpamGuard, SpamGuardPolicy, UserDirectoryService,
    /// };
    /// use library_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use library_backend::outbound::persistence::{JsonBookRepository, JsonUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let data_dir = std::path::Path::new("data");
    /// let guard = Arc::new(DeleteSpamGuard::new(SpamGuardPolicy::default(), Arc::new(DefaultClock)));
    /// let books = Arc::new(BookCatalogueService::new(
    ///     Arc::new(JsonBookRepository::open(data_dir).expect("data dir")),
    ///     guard,
    /// ));
    /// let users = Arc::new(UserDirectoryService::new(Arc::new(
    ///     JsonUserRepository::open(data_dir).expect("data dir"),
    /// )));
    /// let state = HttpState::new(HttpStatePorts {
    ///     books: books.clone(),
    ///     books_command: books,
    ///     users: users.clone(),
    ///     users_command: users,
    /// });
    /// let _books = state.books.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            books,
            books_command,
            users,
            users_command,
        } = ports;
        Self {
            books,
            books_command,
            users,
            users_command,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
