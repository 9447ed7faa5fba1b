use thiserror::Error;

/// Client-caused problems with a search request. Each maps to a 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query is required")]
    MissingQuery,

    #[error("Invalid page number")]
    InvalidPage,

    #[error("Invalid limit")]
    InvalidLimit,

    #[error("Invalid sort criteria")]
    InvalidCriteria,

    #[error("{0}")]
    MalformedQuery(String),
}
