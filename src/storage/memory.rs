use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{CommentStore, StoreError};
use crate::models::{
    comment::{Comment, CommentPage, CommentQuery, CommentUpdate, NewComment},
    user::CommentUser,
};

#[derive(Debug, Clone)]
struct CommentRecord {
    id: i64,
    user_id: i64,
    post_id: i64,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, CommentUser>,
    comments: Vec<CommentRecord>,
    last_id: i64,
}

impl Tables {
    fn joined(&self, record: &CommentRecord) -> Option<Comment> {
        let user = self.users.get(&record.user_id)?;
        Some(Comment {
            id: record.id,
            user_id: record.user_id,
            post_id: record.post_id,
            description: record.description.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            user: user.clone(),
        })
    }
}

/// `CommentStore` kept in process memory.
///
/// Mirrors the PostgreSQL store: IDs start at 1, listings are newest first,
/// comments only join against users registered with `insert_user`.
#[derive(Debug, Default)]
pub struct InMemoryCommentStore {
    tables: RwLock<Tables>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a user that comments can reference.
    pub async fn insert_user(&self, user: CommentUser) {
        self.tables.write().await.users.insert(user.id, user);
    }

    /// Number of stored comments, regardless of author.
    pub async fn len(&self) -> usize {
        self.tables.read().await.comments.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&comment.user_id) {
            return Err(StoreError::Constraint(format!(
                "insert on table \"comments\" violates foreign key constraint: user {} does not exist",
                comment.user_id
            )));
        }

        tables.last_id += 1;
        let record = CommentRecord {
            id: tables.last_id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            description: comment.description,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.comments.push(record.clone());

        tables
            .joined(&record)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn get_all(&self, query: &CommentQuery) -> Result<CommentPage, StoreError> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&CommentRecord> = tables
            .comments
            .iter()
            .filter(|c| tables.users.contains_key(&c.user_id))
            .filter(|c| query.user_id.is_none_or(|id| c.user_id == id))
            .filter(|c| query.post_id.is_none_or(|id| c.post_id == id))
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(0);

        let comments = matching
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|record| tables.joined(record))
            .collect();

        Ok(CommentPage {
            comments,
            count: matching.len() as i64,
        })
    }

    async fn update(&self, update: CommentUpdate) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;

        let record = tables
            .comments
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        record.description = update.description;
        record.updated_at = Some(Utc::now());
        let record = record.clone();

        tables
            .joined(&record)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);

        if tables.comments.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
