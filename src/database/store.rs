use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::{postgres::PgArguments, PgPool, Row};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{PostRow, PostSummary};
use crate::search::{PostFilter, SqlParam};

/// Read access to posts for the search endpoint
#[async_trait]
pub trait PostStore: Send + Sync {
    /// One page of posts matching the filter, ordered by id
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, DatabaseError>;

    /// Number of posts matching the filter, ignoring pagination
    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgPostStore {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            slow_query_threshold: None,
        }
    }

    /// Log any query slower than `threshold` at warn level
    pub fn with_slow_query_warning(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    fn check_elapsed(&self, label: &str, started: Instant) {
        if let Some(threshold) = self.slow_query_threshold {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!("Slow query ({}): {:?} exceeds {:?}", label, elapsed, threshold);
            }
        }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, DatabaseError> {
        let sql_result = filter.to_sql();
        let mut q = sqlx::query_as::<_, PostRow>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }

        let started = Instant::now();
        let rows = q.fetch_all(&self.pool).await?;
        self.check_elapsed("find_posts", started);

        Ok(rows.into_iter().map(PostSummary::from).collect())
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<i64, DatabaseError> {
        let sql_result = filter.to_count_sql();
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }

        let started = Instant::now();
        let row = q.fetch_one(&self.pool).await?;
        self.check_elapsed("count_posts", started);

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::BigInt(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::BigInt(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}
