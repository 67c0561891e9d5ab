use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{CommentStore, StoreError};
use crate::models::{
    comment::{Comment, CommentPage, CommentQuery, CommentUpdate, NewComment},
    user::CommentUser,
};

const COMMENT_COLUMNS: &str = r#"
    c.id, c.user_id, c.post_id, c.description, c.created_at, c.updated_at,
    u.first_name, u.last_name, u.email, u.profile_image_url
"#;

/// Flat row produced by joining 'comments' with 'users'.
#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    user_id: i64,
    post_id: i64,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
    email: String,
    profile_image_url: Option<String>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            user_id: row.user_id,
            post_id: row.post_id,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: CommentUser {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                profile_image_url: row.profile_image_url,
            },
        }
    }
}

/// `CommentStore` backed by PostgreSQL.
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the WHERE clause shared by the page query and the count query.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &CommentQuery) {
    builder.push(" WHERE TRUE");

    if let Some(user_id) = query.user_id {
        builder.push(" AND c.user_id = ").push_bind(user_id);
    }

    if let Some(post_id) = query.post_id {
        builder.push(" AND c.post_id = ").push_bind(post_id);
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let sql = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (user_id, post_id, description)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, post_id, description, created_at, updated_at
            )
            SELECT {COMMENT_COLUMNS}
            FROM c
            INNER JOIN users u ON u.id = c.user_id
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment.user_id)
            .bind(comment.post_id)
            .bind(&comment.description)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn get_all(&self, query: &CommentQuery) -> Result<CommentPage, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(COMMENT_COLUMNS)
            .push(" FROM comments c INNER JOIN users u ON u.id = c.user_id");
        push_filter(&mut builder, query);
        builder
            .push(" ORDER BY c.created_at DESC, c.id DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset());

        let comments = builder
            .build_query_as::<CommentRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Comment::from)
            .collect();

        let mut count_builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(1) FROM comments c INNER JOIN users u ON u.id = c.user_id",
        );
        push_filter(&mut count_builder, query);

        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(CommentPage { comments, count })
    }

    async fn update(&self, update: CommentUpdate) -> Result<Comment, StoreError> {
        let sql = format!(
            r#"
            WITH c AS (
                UPDATE comments SET description = $1
                WHERE id = $2
                RETURNING id, user_id, post_id, description, created_at, updated_at
            )
            SELECT {COMMENT_COLUMNS}
            FROM c
            INNER JOIN users u ON u.id = c.user_id
            "#
        );

        // fetch_one reports a missing row as RowNotFound, which stays a plain database error.
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(&update.description)
            .bind(update.id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
