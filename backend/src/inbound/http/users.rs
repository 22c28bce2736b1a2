//! Users API handlers.
//!
//! ```text
//! GET /retrieve-users
//! POST /add-user {"username":"ada","password":"secret","role":"admin"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_user_validation_error;

/// Registration body for `POST /add-user`.
///
/// `role` is stored as supplied (`"admin"` unlocks the admin actions) and
/// defaults to `"user"` when omitted.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    #[schema(example = "user")]
    pub role: Option<String>,
}

impl TryFrom<AddUserRequest> for User {
    type Error = crate::domain::UserValidationError;

    fn try_from(value: AddUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref(),
            value.password.as_deref(),
            value.role.as_deref(),
        )
    }
}

/// Response body for `GET /retrieve-users`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UsersResponse {
    #[schema(value_type = Vec<UserSchema>)]
    pub users: Vec<User>,
}

/// List registered users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use library_backend::inbound::http::users::retrieve_users;
///
/// let app = App::new().service(retrieve_users);
/// ```
#[utoipa::path(
    get,
    path = "/retrieve-users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "User store unreadable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "retrieveUsers"
)]
#[get("/retrieve-users")]
pub async fn retrieve_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersResponse { users }))
}

/// Register a user and return the full updated list.
#[utoipa::path(
    post,
    path = "/add-user",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User added; full user list", body = [UserSchema]),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/add-user")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<AddUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = User::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let users = state.users_command.add_user(user).await?;
    Ok(HttpResponse::Created().json(users))
}
