use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::comment::Comment;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub is_hidden: bool,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagName {
    pub name: String,
}

/// One search hit as returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_hidden: bool,
    pub author: AuthorName,
    pub tags: Vec<TagName>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// Raw row from the search query; relations arrive as JSON aggregates
#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub author: Json<AuthorName>,
    pub tags: Json<Vec<TagName>>,
    pub comments: Json<Vec<Comment>>,
}

impl From<PostRow> for PostSummary {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            is_hidden: row.is_hidden,
            author: row.author.0,
            tags: row.tags.0,
            comments: row.comments.0,
            created_at: row.created_at,
        }
    }
}
