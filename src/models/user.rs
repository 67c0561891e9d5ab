// src/models/user.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author info embedded in every comment.
/// Read-only projection of the 'users' table, joined at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
}
