//! Full application wiring over the JSON stores in a temporary directory.

use std::path::Path;
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::{App, test, web};
use library_backend::Trace;
use library_backend::domain::{
    BookCatalogueService, DeleteSpamGuard, SpamGuardPolicy, UserDirectoryService,
};
use library_backend::inbound::http::books::{add_book, delete_book, list_books, update_book};
use library_backend::inbound::http::json_config;
use library_backend::inbound::http::state::{HttpState, HttpStatePorts};
use library_backend::inbound::http::users::{add_user, retrieve_users};
use library_backend::outbound::persistence::{JsonBookRepository, JsonUserRepository};
use library_backend::test_support::MutableClock;
use serde_json::Value;
use tempfile::TempDir;

/// Data directory plus the clock driving the delete spam guard.
pub struct Library {
    pub dir: TempDir,
    pub clock: Arc<MutableClock>,
}

impl Library {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp data dir"),
            clock: Arc::new(MutableClock::default()),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fresh stores and services over the data directory.
    pub fn state(&self) -> HttpState {
        let guard = Arc::new(DeleteSpamGuard::new(
            SpamGuardPolicy::default(),
            Arc::clone(&self.clock) as Arc<dyn mockable::Clock>,
        ));
        let books = Arc::new(BookCatalogueService::new(
            Arc::new(JsonBookRepository::open(self.path()).expect("open book store")),
            guard,
        ));
        let users = Arc::new(UserDirectoryService::new(Arc::new(
            JsonUserRepository::open(self.path()).expect("open user store"),
        )));
        HttpState::new(HttpStatePorts {
            books: books.clone(),
            books_command: books,
            users: users.clone(),
            users_command: users,
        })
    }
}

pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(retrieve_users)
            .service(add_user)
            .service(list_books)
            .service(add_book)
            .service(update_book)
            .service(delete_book),
    )
    .await
}

/// Status, headers, and JSON body of a response.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    request: Request,
) -> Reply {
    let response = test::call_service(app, request).await;
    let status = response.status();
    let headers = response.headers().clone();
    let body = test::read_body(response).await;
    let body = serde_json::from_slice(&body).expect("JSON response body");
    Reply {
        status,
        headers,
        body,
    }
}
