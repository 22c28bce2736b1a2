//! Book catalogue API handlers.
//!
//! ```text
//! GET /books
//! POST /books {"user":"alice","title":"T1","author":"A","content":"C"}
//! PUT /books/T1 {"title":"T2","author":"B","content":"D"}
//! DELETE /delete-book?title=T2
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Book, BookEdit, NewBook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_book_validation_error;

const BOOK_ADDED: &str = "Book added";
const BOOK_UPDATED: &str = "Book updated";
const BOOK_DELETED: &str = "book successfully deleted";

/// Request body for `POST /books`. Every field is required and non-blank.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddBookRequest {
    pub user: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<AddBookRequest> for NewBook {
    type Error = crate::domain::BookValidationError;

    fn try_from(value: AddBookRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.user.as_deref(),
            value.title.as_deref(),
            value.author.as_deref(),
            value.content.as_deref(),
        )
    }
}

/// Request body for `PUT /books/{title}`. The owner cannot be changed.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<UpdateBookRequest> for BookEdit {
    type Error = crate::domain::BookValidationError;

    fn try_from(value: UpdateBookRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.title.as_deref(),
            value.author.as_deref(),
            value.content.as_deref(),
        )
    }
}

/// Query string for `DELETE /delete-book`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteBookQuery {
    /// Exact title of the book(s) to delete.
    pub title: Option<String>,
}

/// Response body for `GET /books`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BooksResponse {
    #[schema(value_type = Vec<BookSchema>)]
    pub books: Vec<Book>,
}

/// Response body for successful adds and updates.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BookMutationResponse {
    #[schema(example = "Book added")]
    pub message: String,
    #[schema(value_type = BookSchema)]
    pub book: Book,
}

/// Response body for successful deletes.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteBookResponse {
    pub success: bool,
    #[schema(example = "book successfully deleted")]
    pub message: String,
}

/// List every book in the catalogue.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use library_backend::inbound::http::books::list_books;
///
/// let app = App::new().service(list_books);
/// ```
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Catalogue contents", body = BooksResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<BooksResponse>> {
    let books = state.books.list_books().await?;
    Ok(web::Json(BooksResponse { books }))
}

/// Add a book. Titles must be unique.
#[utoipa::path(
    post,
    path = "/books",
    request_body = AddBookRequest,
    responses(
        (status = 200, description = "Book added", body = BookMutationResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 409, description = "Title already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "addBook"
)]
#[post("/books")]
pub async fn add_book(
    state: web::Data<HttpState>,
    payload: web::Json<AddBookRequest>,
) -> ApiResult<web::Json<BookMutationResponse>> {
    let draft = NewBook::try_from(payload.into_inner()).map_err(map_book_validation_error)?;
    let book = state.books_command.add_book(draft).await?;
    Ok(web::Json(BookMutationResponse {
        message: BOOK_ADDED.to_owned(),
        book,
    }))
}

/// Replace the title, author, and content of the book titled `title`.
#[utoipa::path(
    put,
    path = "/books/{title}",
    params(("title" = String, Path, description = "Current title of the book")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookMutationResponse),
        (status = 400, description = "Missing or blank field", body = ErrorSchema),
        (status = 404, description = "No book with that title", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{title}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateBookRequest>,
) -> ApiResult<web::Json<BookMutationResponse>> {
    let original_title = path.into_inner();
    let edit = BookEdit::try_from(payload.into_inner()).map_err(map_book_validation_error)?;
    let book = state
        .books_command
        .update_book(&original_title, edit)
        .await?;
    Ok(web::Json(BookMutationResponse {
        message: BOOK_UPDATED.to_owned(),
        book,
    }))
}

/// Delete every book with the given title, subject to the delete spam guard.
#[utoipa::path(
    delete,
    path = "/delete-book",
    params(DeleteBookQuery),
    responses(
        (status = 200, description = "Book deleted", body = DeleteBookResponse),
        (status = 400, description = "Missing title", body = ErrorSchema),
        (status = 404, description = "No book with that title", body = ErrorSchema),
        (
            status = 429,
            description = "Delete spam guard is locked",
            body = ErrorSchema,
            headers(("Retry-After" = u64, description = "Seconds until deletes resume"))
        ),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/delete-book")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    query: web::Query<DeleteBookQuery>,
) -> ApiResult<web::Json<DeleteBookResponse>> {
    let DeleteBookQuery { title } = query.into_inner();
    debug!(title = title.as_deref(), "delete requested");
    state.books_command.delete_book(title).await?;
    Ok(web::Json(DeleteBookResponse {
        success: true,
        message: BOOK_DELETED.to_owned(),
    }))
}
