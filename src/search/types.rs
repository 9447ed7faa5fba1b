/// Which post dimension a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCriteria {
    Title,
    Tags,
    Content,
    Templates,
}

impl SearchCriteria {
    /// Resolution order when more than one flag is set
    pub const PRECEDENCE: [SearchCriteria; 4] = [
        SearchCriteria::Title,
        SearchCriteria::Tags,
        SearchCriteria::Content,
        SearchCriteria::Templates,
    ];
}

impl std::fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchCriteria::Title => "title",
            SearchCriteria::Tags => "tags",
            SearchCriteria::Content => "content",
            SearchCriteria::Templates => "templates",
        };
        f.write_str(name)
    }
}

/// Validated 1-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    offset: i64,
}

impl Pagination {
    /// Returns `None` when page or limit is below 1, or the offset overflows.
    pub fn new(page: i64, limit: i64) -> Option<Self> {
        if page < 1 || limit < 1 {
            return None;
        }
        let offset = (page - 1).checked_mul(limit)?;
        Some(Self { page, limit, offset })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// ceil(total / limit), without overflowing for huge limits
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        total / self.limit + i64::from(total % self.limit != 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    BigInt(i64),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
