//! Grill HTTP handlers.
//!
//! ```text
//! GET /items?q=ribs&sort=top
//! GET /items/leaderboard?limit=3
//! GET /items/mine
//! GET /items/all
//! GET /items/{id}
//! POST /items
//! PUT /items/{id}
//! DELETE /items/{id}
//! POST /items/{id}/like
//! ```
//!
//! Literal segments (`/leaderboard`, `/mine`, `/all`) must be registered
//! before the `/{id}` capture or they would parse as grill ids.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Principal;
use crate::domain::ports::{
    CreateGrillRequest, GrillListing, GrillView, LeaderboardEntry, LikeOutcome,
    ListGrillsRequest, UpdateGrillRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::{AdminPrincipal, MaybePrincipal};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_grill_id, parse_leaderboard_limit, parse_sort_mode,
};

/// Confirmation message returned after a successful delete.
pub const GRILL_DELETED: &str = "Grill deleted";

/// Grill owner as shown in the full projection.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Full grill projection returned by most endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrillBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub likes_count: usize,
    pub liked_by_current_user: bool,
    pub owner: OwnerBody,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<GrillView> for GrillBody {
    fn from(view: GrillView) -> Self {
        Self {
            id: view.id.to_string(),
            title: view.title,
            description: view.description,
            image_ref: view.image_ref,
            likes_count: view.likes_count,
            liked_by_current_user: view.liked_by_current_user,
            owner: OwnerBody {
                id: view.owner.id.to_string(),
                name: view.owner.name,
                email: view.owner.email,
            },
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

/// Listing response with the filtered total.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrillListResponseBody {
    pub items: Vec<GrillBody>,
    pub total: usize,
}

impl From<GrillListing> for GrillListResponseBody {
    fn from(listing: GrillListing) -> Self {
        Self {
            total: listing.total,
            items: listing.items.into_iter().map(GrillBody::from).collect(),
        }
    }
}

/// Reduced owner shown on the leaderboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardOwnerBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
}

/// Reduced grill projection shown on the leaderboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub likes_count: usize,
    pub owner: LeaderboardOwnerBody,
}

impl From<LeaderboardEntry> for LeaderboardEntryBody {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title,
            image_ref: entry.image_ref,
            likes_count: entry.likes_count,
            owner: LeaderboardOwnerBody {
                id: entry.owner.id.to_string(),
                name: entry.owner.name,
            },
        }
    }
}

/// Leaderboard response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponseBody {
    pub items: Vec<LeaderboardEntryBody>,
}

/// Like toggle response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub likes_count: usize,
    pub liked_by_current_user: bool,
}

impl From<LikeOutcome> for LikeResponseBody {
    fn from(outcome: LikeOutcome) -> Self {
        Self {
            id: outcome.id.to_string(),
            likes_count: outcome.likes_count,
            liked_by_current_user: outcome.liked_by_current_user,
        }
    }
}

/// Confirmation message body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Creation request body for `POST /items`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrillBody {
    pub title: String,
    pub description: String,
    pub image_ref: Option<String>,
}

impl From<CreateGrillBody> for CreateGrillRequest {
    fn from(body: CreateGrillBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            image_ref: body.image_ref,
        }
    }
}

/// Update request body for `PUT /items/{id}`; absent fields stay as-is.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGrillBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

impl From<UpdateGrillBody> for UpdateGrillRequest {
    fn from(body: UpdateGrillBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            image_ref: body.image_ref,
        }
    }
}

/// Raw query parameters for the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQueryParams {
    pub q: Option<String>,
    pub sort: Option<String>,
}

/// Raw query parameters for the leaderboard endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardQueryParams {
    pub limit: Option<String>,
}

/// List grills with optional search and ordering.
#[utoipa::path(
    get,
    path = "/items",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring over title and description"),
        ("sort" = Option<String>, Query, description = "Ordering: new (default) or top")
    ),
    responses(
        (status = 200, description = "Grills", body = GrillListResponseBody),
        (status = 400, description = "Unknown sort value", body = ErrorSchema),
        (status = 401, description = "Invalid token supplied", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "listGrills",
    security((), ("BearerAuth" = []))
)]
#[get("")]
pub async fn list_grills(
    state: web::Data<HttpState>,
    identity: MaybePrincipal,
    query: web::Query<ListQueryParams>,
) -> ApiResult<web::Json<GrillListResponseBody>> {
    let params = query.into_inner();
    let request = ListGrillsRequest {
        query: params.q,
        sort: parse_sort_mode(params.sort.as_deref())?,
    };
    let listing = state.grill_queries.list(identity.viewer(), request).await?;
    Ok(web::Json(GrillListResponseBody::from(listing)))
}

/// The most liked grills in reduced projection.
#[utoipa::path(
    get,
    path = "/items/leaderboard",
    params(
        ("limit" = Option<i64>, Query, description = "Board size, clamped to 1..=50; defaults to 3")
    ),
    responses(
        (status = 200, description = "Leaderboard", body = LeaderboardResponseBody),
        (status = 400, description = "Non-numeric limit", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    query: web::Query<LeaderboardQueryParams>,
) -> ApiResult<web::Json<LeaderboardResponseBody>> {
    let limit = parse_leaderboard_limit(query.limit.as_deref())?;
    let entries = state.grill_queries.leaderboard(limit).await?;
    Ok(web::Json(LeaderboardResponseBody {
        items: entries.into_iter().map(LeaderboardEntryBody::from).collect(),
    }))
}

/// The caller's own grills, newest first.
#[utoipa::path(
    get,
    path = "/items/mine",
    responses(
        (status = 200, description = "Own grills", body = GrillListResponseBody),
        (status = 401, description = "Not authenticated", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "myGrills",
    security(("BearerAuth" = []))
)]
#[get("/mine")]
pub async fn my_grills(
    state: web::Data<HttpState>,
    principal: Principal,
) -> ApiResult<web::Json<GrillListResponseBody>> {
    let listing = state.grill_queries.mine(&principal.user_id).await?;
    Ok(web::Json(GrillListResponseBody::from(listing)))
}

/// Every grill, newest first, for moderation.
#[utoipa::path(
    get,
    path = "/items/all",
    responses(
        (status = 200, description = "All grills", body = GrillListResponseBody),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "allGrills",
    security(("BearerAuth" = []))
)]
#[get("/all")]
pub async fn all_grills(
    state: web::Data<HttpState>,
    admin: AdminPrincipal,
) -> ApiResult<web::Json<GrillListResponseBody>> {
    let listing = state
        .grill_queries
        .list(Some(admin.0.user_id), ListGrillsRequest::default())
        .await?;
    Ok(web::Json(GrillListResponseBody::from(listing)))
}

/// A single grill by id.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = uuid::Uuid, Path, description = "Grill id")),
    responses(
        (status = 200, description = "Grill", body = GrillBody),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "getGrill",
    security((), ("BearerAuth" = []))
)]
#[get("/{id}")]
pub async fn get_grill(
    state: web::Data<HttpState>,
    identity: MaybePrincipal,
    path: web::Path<String>,
) -> ApiResult<web::Json<GrillBody>> {
    let id = parse_grill_id(&path.into_inner())?;
    let view = state.grill_queries.get(identity.viewer(), &id).await?;
    Ok(web::Json(GrillBody::from(view)))
}

/// Create a grill owned by the caller.
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateGrillBody,
    responses(
        (status = 201, description = "Grill created", body = GrillBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "createGrill",
    security(("BearerAuth" = []))
)]
#[post("")]
pub async fn create_grill(
    state: web::Data<HttpState>,
    principal: Principal,
    payload: web::Json<CreateGrillBody>,
) -> ApiResult<HttpResponse> {
    let view = state
        .grill_commands
        .create(&principal, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(GrillBody::from(view)))
}

/// Edit a grill as its owner or an admin.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = uuid::Uuid, Path, description = "Grill id")),
    request_body = UpdateGrillBody,
    responses(
        (status = 200, description = "Grill updated", body = GrillBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "updateGrill",
    security(("BearerAuth" = []))
)]
#[put("/{id}")]
pub async fn update_grill(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
    payload: web::Json<UpdateGrillBody>,
) -> ApiResult<web::Json<GrillBody>> {
    let id = parse_grill_id(&path.into_inner())?;
    let view = state
        .grill_commands
        .update(&principal, &id, payload.into_inner().into())
        .await?;
    Ok(web::Json(GrillBody::from(view)))
}

/// Remove a grill as its owner or an admin.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = uuid::Uuid, Path, description = "Grill id")),
    responses(
        (status = 200, description = "Grill deleted", body = MessageBody),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "deleteGrill",
    security(("BearerAuth" = []))
)]
#[delete("/{id}")]
pub async fn delete_grill(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = parse_grill_id(&path.into_inner())?;
    state.grill_commands.delete(&principal, &id).await?;
    Ok(web::Json(MessageBody {
        message: GRILL_DELETED.to_owned(),
    }))
}

/// Flip the caller's like on a grill.
#[utoipa::path(
    post,
    path = "/items/{id}/like",
    params(("id" = uuid::Uuid, Path, description = "Grill id")),
    responses(
        (status = 200, description = "Like toggled", body = LikeResponseBody),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 404, description = "Unknown or malformed id", body = ErrorSchema)
    ),
    tags = ["grills"],
    operation_id = "toggleLike",
    security(("BearerAuth" = []))
)]
#[post("/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    principal: Principal,
    path: web::Path<String>,
) -> ApiResult<web::Json<LikeResponseBody>> {
    let id = parse_grill_id(&path.into_inner())?;
    let outcome = state.grill_commands.toggle_like(&principal, &id).await?;
    Ok(web::Json(LikeResponseBody::from(outcome)))
}

#[cfg(test)]
#[path = "grills_tests.rs"]
mod tests;
