//! Account HTTP handlers.
//!
//! ```text
//! POST /auth/register {"name":"...","email":"...","password":"...","confirmPassword":"..."}
//! POST /auth/login {"email":"...","password":"..."}
//! GET /auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Principal;
use crate::domain::User;
use crate::domain::ports::{AuthenticatedAccount, LoginRequest, RegisterRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
            phone: body.phone,
        }
    }
}

/// Login request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl From<LoginBody> for LoginRequest {
    fn from(body: LoginBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

/// Public projection of a stored account.
///
/// Password material never appears here; the struct simply has no field
/// for it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[schema(example = "user")]
    pub role: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            phone: user.phone().map(ToOwned::to_owned),
            role: user.role().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Response payload for register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseBody {
    pub user: UserBody,
    pub token: String,
}

impl From<AuthenticatedAccount> for AuthResponseBody {
    fn from(account: AuthenticatedAccount) -> Self {
        Self {
            user: UserBody::from(&account.user),
            token: account.token,
        }
    }
}

/// Response payload for `GET /auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseBody {
    pub user: UserBody,
}

/// Register a new account and sign it in.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = AuthResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let account = state.accounts.register(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(AuthResponseBody::from(account)))
}

/// Authenticate existing credentials.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<AuthResponseBody>> {
    let account = state.accounts.login(payload.into_inner().into()).await?;
    Ok(web::Json(AuthResponseBody::from(account)))
}

/// Return the account behind the presented token.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current account", body = MeResponseBody),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "me",
    security(("BearerAuth" = []))
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<MeResponseBody>> {
    let user = state.accounts.current_user(&principal.user_id).await?;
    Ok(web::Json(MeResponseBody {
        user: UserBody::from(&user),
    }))
}
