use serde::Deserialize;

use super::error::SearchError;
use super::types::{Pagination, SearchCriteria};
use crate::config::SearchConfig;

/// Raw query string for `/api/posts/my-search`; numbers are parsed in [`SearchParams::validate`]
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub sort_by_title: Option<String>,
    pub sort_by_tags: Option<String>,
    pub sort_by_content: Option<String>,
    pub sort_by_templates: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A search request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub needle: String,
    pub criteria: SearchCriteria,
    pub pagination: Pagination,
}

impl SearchParams {
    fn flag(&self, criteria: SearchCriteria) -> Option<&str> {
        match criteria {
            SearchCriteria::Title => self.sort_by_title.as_deref(),
            SearchCriteria::Tags => self.sort_by_tags.as_deref(),
            SearchCriteria::Content => self.sort_by_content.as_deref(),
            SearchCriteria::Templates => self.sort_by_templates.as_deref(),
        }
    }

    /// First truthy flag in precedence order
    pub fn criteria(&self) -> Option<SearchCriteria> {
        SearchCriteria::PRECEDENCE
            .into_iter()
            .find(|c| self.flag(*c).is_some_and(|v| v.eq_ignore_ascii_case("true")))
    }

    pub fn validate(&self, config: &SearchConfig) -> Result<SearchRequest, SearchError> {
        let needle = match self.query.as_deref() {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => return Err(SearchError::MissingQuery),
        };

        let page = match self.page.as_deref() {
            None => 1,
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| SearchError::InvalidPage)?,
        };
        if page < 1 {
            return Err(SearchError::InvalidPage);
        }

        let requested = match self.limit.as_deref() {
            None => config.default_limit,
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| SearchError::InvalidLimit)?,
        };
        if requested < 1 {
            return Err(SearchError::InvalidLimit);
        }
        let max_limit = config.max_limit.unwrap_or(i64::MAX);
        let limit = if requested > max_limit {
            if config.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", requested, max_limit);
            }
            max_limit
        } else {
            requested
        };

        let criteria = self.criteria().ok_or(SearchError::InvalidCriteria)?;
        let pagination = Pagination::new(page, limit).ok_or(SearchError::InvalidPage)?;

        Ok(SearchRequest {
            needle,
            criteria,
            pagination,
        })
    }
}
