//! Builders wiring JSON repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use library_backend::domain::{BookCatalogueService, DeleteSpamGuard, UserDirectoryService};
use library_backend::inbound::http::state::{HttpState, HttpStatePorts};
use library_backend::outbound::persistence::{JsonBookRepository, JsonUserRepository};

use super::ServerConfig;

/// Open both stores under the configured data directory and build the
/// services behind the HTTP ports.
///
/// # Errors
/// Returns [`std::io::Error`] when the data directory cannot be created or
/// opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let data_dir = config.data_dir();
    let book_repo = Arc::new(JsonBookRepository::open(data_dir)?);
    let user_repo = Arc::new(JsonUserRepository::open(data_dir)?);
    let delete_guard = Arc::new(DeleteSpamGuard::new(
        config.delete_policy,
        Arc::new(DefaultClock),
    ));
    info!(
        data_dir = %data_dir.display(),
        threshold = config.delete_policy.threshold(),
        window_secs = config.delete_policy.window().as_secs(),
        cooldown_secs = config.delete_policy.cooldown().as_secs(),
        "stores bound"
    );

    let books = Arc::new(BookCatalogueService::new(book_repo, delete_guard));
    let users = Arc::new(UserDirectoryService::new(user_repo));
    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        books: books.clone(),
        books_command: books,
        users: users.clone(),
        users_command: users,
    })))
}
