//! Domain primitives, services, and ports.
//!
//! Purpose: hold the catalogue's business rules independent of HTTP and file
//! formats. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Book, NewBook, BookEdit: catalogue records and validated inputs.
//! - User, Role: user records.
//! - DeleteSpamGuard, SpamGuardPolicy: delete rate limiting.
//! - BookCatalogueService, UserDirectoryService: port implementations.

pub mod book;
mod book_catalogue_service;
pub mod error;
pub mod ports;
pub mod spam_guard;
mod trace_id;
pub mod user;
mod user_directory_service;

pub use self::book::{Book, BookEdit, BookField, BookValidationError, NewBook};
pub use self::book_catalogue_service::BookCatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::spam_guard::{AttemptOutcome, DeleteSpamGuard, SpamGuardPolicy, SpamGuardPolicyError};
pub use self::trace_id::TraceId;
pub use self::user::{Role, User, UserValidationError};
pub use self::user_directory_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use library_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("book not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
