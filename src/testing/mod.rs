use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{generate_jwt, Claims};
use crate::database::models::{AuthorName, Comment, Post, PostSummary, Tag, TagName, Template, User};
use crate::database::{DatabaseError, PostStore};
use crate::search::{PostFilter, SearchCriteria};
use crate::state::AppState;

/// In-memory stand-in for Postgres that applies the same matching rules as
/// the generated SQL: author scoping, case-insensitive literal substring,
/// id ordering, offset/limit.
#[derive(Debug, Default, Clone)]
pub struct MemoryPostStore {
    users: Vec<User>,
    posts: Vec<Post>,
    tags: Vec<Tag>,
    post_tags: Vec<(i32, i32)>,
    templates: Vec<Template>,
    post_templates: Vec<(i32, i32)>,
    comments: Vec<Comment>,
    fail_with: Option<String>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query fails with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn add_user(&mut self, id: i32, first_name: &str, last_name: &str) {
        self.users.push(User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        });
    }

    pub fn add_post(&mut self, author_id: i32, title: &str, content: &str) -> i32 {
        let id = self.posts.len() as i32 + 1;
        self.posts.push(Post {
            id,
            title: title.to_string(),
            description: format!("about {title}"),
            content: content.to_string(),
            is_hidden: false,
            author_id,
            created_at: Self::timestamp(id),
        });
        id
    }

    pub fn tag_post(&mut self, post_id: i32, name: &str) {
        let tag_id = match self.tags.iter().find(|t| t.name == name) {
            Some(tag) => tag.id,
            None => {
                let id = self.tags.len() as i32 + 1;
                self.tags.push(Tag { id, name: name.to_string() });
                id
            }
        };
        self.post_tags.push((post_id, tag_id));
    }

    pub fn template_post(&mut self, post_id: i32, title: &str) {
        let id = self.templates.len() as i32 + 1;
        self.templates.push(Template { id, title: title.to_string() });
        self.post_templates.push((post_id, id));
    }

    pub fn add_comment(&mut self, post_id: i32, author_id: i32, content: &str) {
        let id = self.comments.len() as i32 + 1;
        self.comments.push(Comment {
            id,
            content: content.to_string(),
            author_id,
            post_id,
            parent_id: None,
            is_hidden: false,
            created_at: Self::timestamp(id),
        });
    }

    fn timestamp(offset_minutes: i32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(offset_minutes as i64)
    }

    fn check_failure(&self) -> Result<(), DatabaseError> {
        match &self.fail_with {
            Some(message) => Err(DatabaseError::Sqlx(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }

    fn tag_names(&self, post_id: i32) -> Vec<&str> {
        self.post_tags
            .iter()
            .filter(|(p, _)| *p == post_id)
            .filter_map(|(_, t)| self.tags.iter().find(|tag| tag.id == *t))
            .map(|tag| tag.name.as_str())
            .collect()
    }

    fn template_titles(&self, post_id: i32) -> Vec<&str> {
        self.post_templates
            .iter()
            .filter(|(p, _)| *p == post_id)
            .filter_map(|(_, t)| self.templates.iter().find(|tpl| tpl.id == *t))
            .map(|tpl| tpl.title.as_str())
            .collect()
    }

    fn matching(&self, filter: &PostFilter) -> Vec<&Post> {
        let needle = filter.needle.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| p.author_id == filter.author_id)
            .filter(|p| match filter.criteria {
                SearchCriteria::Title => contains(&p.title),
                SearchCriteria::Content => contains(&p.content),
                SearchCriteria::Tags => self.tag_names(p.id).into_iter().any(|t| contains(t)),
                SearchCriteria::Templates => self.template_titles(p.id).into_iter().any(|t| contains(t)),
            })
            .collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    fn summarize(&self, post: &Post) -> PostSummary {
        let author = self
            .users
            .iter()
            .find(|u| u.id == post.author_id)
            .map(|u| AuthorName {
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
            })
            .unwrap_or(AuthorName {
                first_name: String::new(),
                last_name: String::new(),
            });

        let mut tags: Vec<TagName> = self
            .tag_names(post.id)
            .into_iter()
            .map(|name| TagName { name: name.to_string() })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let comments = self
            .comments
            .iter()
            .filter(|c| c.post_id == post.id)
            .cloned()
            .collect();

        PostSummary {
            id: post.id,
            title: post.title.clone(),
            description: post.description.clone(),
            is_hidden: post.is_hidden,
            author,
            tags,
            comments,
            created_at: post.created_at,
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, DatabaseError> {
        self.check_failure()?;
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(filter.pagination.offset() as usize)
            .take(filter.pagination.limit as usize)
            .map(|p| self.summarize(p))
            .collect())
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DatabaseError> {
        self.check_failure()?;
        Ok(self.matching(filter).len() as i64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_failure()
    }
}

/// Bearer token for `user_id`, signed with the configured secret
pub fn bearer(user_id: i32) -> String {
    let token = generate_jwt(&Claims::new(user_id)).expect("sign test token");
    format!("Bearer {token}")
}

/// Drive the full router once and decode the JSON body
pub async fn send(store: MemoryPostStore, method: &str, uri: &str, user_id: Option<i32>) -> (StatusCode, Value) {
    let app = crate::app::app(AppState::new(store));

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(AUTHORIZATION, bearer(id));
    }
    let request = builder.body(Body::empty()).expect("build request");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
