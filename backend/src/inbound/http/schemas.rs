//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested book does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A book with the same title already exists.
    #[schema(rename = "conflict")]
    Conflict,
    /// The delete spam guard is locked.
    #[schema(rename = "too_many_requests")]
    TooManyRequests,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "book not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field or
    /// `retryAfterSecs` for rate-limited deletes.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = Book)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookSchema {
    /// Owner name, fixed at creation.
    #[schema(example = "alice")]
    user: String,
    /// Title, unique within the catalogue.
    #[schema(example = "The Left Hand of Darkness")]
    title: String,
    #[schema(example = "Ursula K. Le Guin")]
    author: String,
    content: String,
}

/// OpenAPI schema for [`crate::domain::Role`]: `"admin"`, `"user"`, or any
/// other client-supplied string.
#[derive(ToSchema)]
#[schema(as = Role, example = "admin")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RoleSchema(String);

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "ada")]
    username: String,
    /// Stored as supplied.
    password: String,
    role: RoleSchema,
}
