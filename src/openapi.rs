use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    handlers::comment,
    models::{
        comment::{Comment, CommentPage, CreateCommentRequest, UpdateCommentRequest},
        common::{ErrorResponse, MessageResponse},
        user::CommentUser,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        comment::create_comment,
        comment::list_comments,
        comment::update_comment,
        comment::delete_comment,
    ),
    components(schemas(
        Comment,
        CommentUser,
        CommentPage,
        CreateCommentRequest,
        UpdateCommentRequest,
        ErrorResponse,
        MessageResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "comments", description = "Blog post comments"),
    ),
    info(
        title = "Blog Comments API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
