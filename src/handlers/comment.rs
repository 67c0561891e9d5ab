use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        comment::{
            Comment, CommentListParams, CommentPage, CommentQuery, CommentUpdate,
            CreateCommentRequest, NewComment, UpdateCommentRequest,
        },
        common::{ErrorResponse, MessageResponse},
    },
    storage::CommentStore,
    utils::{
        extract::{AppJson, AppPath, AppQuery},
        html::clean_html,
        jwt::AuthPayload,
    },
};

/// Create a new comment.
/// Requires: Login. The author is always the authenticated caller.
#[utoipa::path(
    post,
    path = "/comments",
    tag = "comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid body, identity or reference", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(store): State<Arc<dyn CommentStore>>,
    auth: AuthPayload,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Length limits apply to the text that is actually stored.
    let payload = CreateCommentRequest {
        description: clean_html(&payload.description),
        ..payload
    };
    payload.validate()?;

    let comment = store
        .create(NewComment {
            user_id: auth.user_id,
            post_id: payload.post_id,
            description: payload.description,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to create comment: {:?}", e);
            AppError::BadRequest(e.to_string())
        })?;

    tracing::info!(comment_id = comment.id, user_id = auth.user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// List comments (Recent first).
/// Supports page/limit pagination and optional author/post filters.
#[utoipa::path(
    get,
    path = "/comments",
    tag = "comments",
    params(CommentListParams),
    responses(
        (status = 200, description = "One page of comments", body = CommentPage),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    State(store): State<Arc<dyn CommentStore>>,
    AppQuery(params): AppQuery<CommentListParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let query = CommentQuery::from(params);

    let page = store
        .get_all(&query)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(page))
}

/// Update the description of a comment.
#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 400, description = "Invalid ID or body", body = ErrorResponse),
        (status = 500, description = "Storage failure, including a missing comment", body = ErrorResponse)
    )
)]
pub async fn update_comment(
    State(store): State<Arc<dyn CommentStore>>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = UpdateCommentRequest {
        description: clean_html(&payload.description),
    };
    payload.validate()?;

    // A missing comment is not told apart from other storage failures here.
    let comment = store
        .update(CommentUpdate {
            id,
            description: payload.description,
        })
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!(comment_id = comment.id, "Comment updated");

    Ok(Json(comment))
}

/// Delete a comment (Hard Delete).
/// Requires: Login.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID or identity", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    State(store): State<Arc<dyn CommentStore>>,
    auth: AuthPayload,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    store.delete(id).await?;

    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");

    Ok(Json(MessageResponse {
        message: "Successfully deleted".to_string(),
    }))
}
