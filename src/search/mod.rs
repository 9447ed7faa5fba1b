pub mod error;
pub mod filter;
pub mod params;
pub mod types;

pub use error::SearchError;
pub use filter::PostFilter;
pub use params::{SearchParams, SearchRequest};
pub use types::*;
