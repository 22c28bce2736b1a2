//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (books, users,
//!   health)
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::books::{
    AddBookRequest, BookMutationResponse, BooksResponse, DeleteBookResponse, UpdateBookRequest,
};
use crate::inbound::http::schemas::{
    BookSchema, ErrorCodeSchema, ErrorSchema, RoleSchema, UserSchema,
};
use crate::inbound::http::users::{AddUserRequest, UsersResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library catalogue API",
        description = "Book catalogue and user registry backed by JSON document stores."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::add_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::users::retrieve_users,
        crate::inbound::http::users::add_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookSchema,
        UserSchema,
        RoleSchema,
        ErrorSchema,
        ErrorCodeSchema,
        AddBookRequest,
        UpdateBookRequest,
        BooksResponse,
        BookMutationResponse,
        DeleteBookResponse,
        AddUserRequest,
        UsersResponse,
    )),
    tags(
        (name = "books", description = "Catalogue operations"),
        (name = "users", description = "User registry operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
