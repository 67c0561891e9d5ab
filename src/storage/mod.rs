pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::models::comment::{Comment, CommentPage, CommentQuery, CommentUpdate, NewComment};

pub use memory::InMemoryCommentStore;
pub use postgres::PgCommentStore;

/// Failures reported by a `CommentStore`.
#[derive(Debug)]
pub enum StoreError {
    /// The targeted comment does not exist. Only `delete` reports this.
    NotFound,

    /// A referential or check constraint rejected the write.
    Constraint(String),

    /// Any other driver or connectivity failure.
    Database(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "comment not found"),
            StoreError::Constraint(msg) => write!(f, "{}", msg),
            StoreError::Database(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let is_constraint = err.as_database_error().is_some_and(|db| {
            db.is_foreign_key_violation() || db.is_check_violation()
        });

        if is_constraint {
            StoreError::Constraint(err.to_string())
        } else {
            StoreError::Database(err)
        }
    }
}

/// Persistence for comments.
///
/// Every call is a single auto-committed statement (two for `get_all`);
/// isolation between concurrent requests is left to the database.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Inserts a comment and returns it with the generated ID, timestamps and author.
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// Returns one page of comments, newest first, plus the total filtered count.
    async fn get_all(&self, query: &CommentQuery) -> Result<CommentPage, StoreError>;

    /// Overwrites the description of an existing comment.
    ///
    /// A missing row surfaces as `StoreError::Database`, not `NotFound`.
    async fn update(&self, update: CommentUpdate) -> Result<Comment, StoreError>;

    /// Removes a comment. Fails with `StoreError::NotFound` when no row matched.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
