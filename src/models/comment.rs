use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::user::CommentUser;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// A row of the 'comments' table together with its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Maintained by the database on every update.
    pub updated_at: Option<DateTime<Utc>>,
    pub user: CommentUser,
}

/// DTO for creating a new comment.
/// The author is always the authenticated caller, so there is no `user_id` here.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub description: String,

    #[validate(range(min = 1, message = "post_id must be a positive integer"))]
    pub post_id: i64,
}

/// DTO for updating a comment. Only the description can change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub description: String,
}

/// Query parameters for listing comments.
///
/// A filter of `0` is the same as leaving it out.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentListParams {
    /// Page size (default: 10, max: 100).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,

    /// 1-based page number (default: 1).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1, message = "page must be a positive integer"))]
    pub page: Option<i64>,

    /// Only comments written by this user.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 0, message = "user_id must not be negative"))]
    pub user_id: Option<i64>,

    /// Only comments on this post.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 0, message = "post_id must not be negative"))]
    pub post_id: Option<i64>,
}

/// `?limit=` is treated like a missing parameter rather than a parse failure.
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Fields supplied when inserting a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
}

/// Fields supplied when updating a comment.
#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub id: i64,
    pub description: String,
}

/// Resolved filter and pagination window for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentQuery {
    pub page: i64,
    pub limit: i64,
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

impl CommentQuery {
    /// Number of rows skipped before the current page.
    /// Pages past `i64::MAX` rows clamp there and simply come back empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<CommentListParams> for CommentQuery {
    fn from(params: CommentListParams) -> Self {
        Self {
            page: params.page.unwrap_or(DEFAULT_PAGE),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
            user_id: params.user_id.filter(|&id| id != 0),
            post_id: params.post_id.filter(|&id| id != 0),
        }
    }
}

/// One page of comments plus the size of the whole filtered set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub count: i64,
}
