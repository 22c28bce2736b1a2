//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{
    Book, BookCatalogueService, DeleteSpamGuard, NewBook, SpamGuardPolicy, User,
    UserDirectoryService,
};
use crate::inbound::http::json_config;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::{InMemoryBookRepository, InMemoryUserRepository, MutableClock};

/// In-memory wiring for handler tests.
pub struct TestHarness {
    pub state: HttpState,
    pub books: Arc<InMemoryBookRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub clock: Arc<MutableClock>,
}

impl TestHarness {
    pub fn new(books: Vec<Book>, users: Vec<User>) -> Self {
        let clock = Arc::new(MutableClock::default());
        let guard = Arc::new(DeleteSpamGuard::new(
            SpamGuardPolicy::default(),
            Arc::clone(&clock) as Arc<dyn mockable::Clock>,
        ));
        let books = Arc::new(InMemoryBookRepository::with_books(books));
        let users = Arc::new(InMemoryUserRepository::with_users(users));
        let book_service = Arc::new(BookCatalogueService::new(Arc::clone(&books), guard));
        let user_service = Arc::new(UserDirectoryService::new(Arc::clone(&users)));
        let state = HttpState::new(HttpStatePorts {
            books: book_service.clone(),
            books_command: book_service,
            users: user_service.clone(),
            users_command: user_service,
        });
        Self {
            state,
            books,
            users,
            clock,
        }
    }

    /// App with shared state and JSON config; callers add services.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .app_data(json_config())
    }
}

pub fn book(user: &str, title: &str) -> Book {
    Book::from(
        NewBook::try_from_parts(Some(user), Some(title), Some("Author"), Some("Body"))
            .expect("valid draft"),
    )
}

pub fn user(username: &str, role: &str) -> User {
    User::try_from_parts(Some(username), Some("pw"), Some(role)).expect("valid user")
}
