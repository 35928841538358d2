//! # User Routes
//!
//! CRUD endpoints over the user store, mounted under `/api/v1`.

use std::collections::HashMap;

use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, info};

use crate::http_server::middleware::RequestContext;
use crate::http_server::state::SharedState;
use crate::store::User;

use super::errors::{ApiError, ApiResult};
use super::extract::{JsonBody, UserId};
use super::parser::ListQuery;
use super::response::{Envelope, Pagination};
use super::validation::{validate_create, validate_update, CreateUserRequest, UpdateUserRequest};

/// Build the user routes
///
/// Unsupported methods on these paths answer with the not-found envelope
/// instead of a bare 405.
pub fn user_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/users",
            get(list_users).post(create_user).fallback(route_not_found),
        )
        .route(
            "/users/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(user_route_not_found),
        )
}

/// List users with optional search and pagination
async fn list_users(
    State(state): State<SharedState>,
    ctx: RequestContext,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Envelope<Vec<User>>>> {
    let query = ListQuery::parse(&query);
    let store = state.read()?;

    let matched = store.search(query.search.as_deref());
    let pagination = Pagination::new(query.page, query.limit, matched.len());
    let page: Vec<User> = matched
        .into_iter()
        .skip(query.offset())
        .take(query.limit)
        .cloned()
        .collect();

    debug!(
        page = query.page,
        limit = query.limit,
        returned = page.len(),
        "listed users"
    );
    Ok(Json(Envelope::paginated(page, pagination, &ctx)))
}

/// Create a user
async fn create_user(
    State(state): State<SharedState>,
    ctx: RequestContext,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<User>>)> {
    let new_user = validate_create(body)?;
    let user = state.write()?.create(new_user)?;

    info!(user_id = user.id, "user created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("User created successfully", user, &ctx)),
    ))
}

/// Fetch a single user
async fn get_user(
    State(state): State<SharedState>,
    ctx: RequestContext,
    UserId(id): UserId,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.read()?.get(id)?.clone();
    Ok(Json(Envelope::new(user, &ctx)))
}

/// Update the provided fields of a user
async fn update_user(
    State(state): State<SharedState>,
    ctx: RequestContext,
    UserId(id): UserId,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> ApiResult<Json<Envelope<User>>> {
    let patch = validate_update(body)?;
    let user = state.write()?.update(id, patch)?;

    info!(user_id = id, "user updated");
    Ok(Json(Envelope::with_message("User updated successfully", user, &ctx)))
}

/// Delete a user, returning the removed record
async fn delete_user(
    State(state): State<SharedState>,
    ctx: RequestContext,
    UserId(id): UserId,
) -> ApiResult<Json<Envelope<User>>> {
    let user = state.write()?.delete(id)?;

    info!(user_id = id, "user deleted");
    Ok(Json(Envelope::with_message("User deleted successfully", user, &ctx)))
}

/// Fallback for unmatched routes
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound(uri.to_string())
}

/// Fallback for unsupported methods on `/users/:id`; the id is still
/// validated first, so a malformed id reports 400 whatever the method
async fn user_route_not_found(UserId(_): UserId, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound(uri.to_string())
}
