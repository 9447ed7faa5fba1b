pub mod my_search;

pub use my_search::{my_search, SearchResponse};
