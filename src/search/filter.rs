use super::params::SearchRequest;
use super::types::{Pagination, SearchCriteria, SqlParam, SqlResult};

// Row shape shared by every criteria; author, tags and comments arrive as JSON aggregates
const POST_COLUMNS: &str = r#"p.id, p.title, p.description, p.is_hidden, p.created_at,
    json_build_object('firstName', u.first_name, 'lastName', u.last_name) AS author,
    COALESCE((
        SELECT json_agg(json_build_object('name', t.name) ORDER BY t.name)
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = p.id
    ), '[]'::json) AS tags,
    COALESCE((
        SELECT json_agg(json_build_object(
            'id', c.id,
            'content', c.content,
            'authorId', c.author_id,
            'postId', c.post_id,
            'parentId', c.parent_id,
            'isHidden', c.is_hidden,
            'createdAt', c.created_at
        ) ORDER BY c.id)
        FROM comments c
        WHERE c.post_id = p.id
    ), '[]'::json) AS comments"#;

/// Author-scoped predicate plus page window. Compiles to both the page query
/// and the unpaginated count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: i32,
    pub criteria: SearchCriteria,
    pub needle: String,
    pub pagination: Pagination,
}

impl PostFilter {
    pub fn new(author_id: i32, request: SearchRequest) -> Self {
        Self {
            author_id,
            criteria: request.criteria,
            needle: request.needle,
            pagination: request.pagination,
        }
    }

    /// ILIKE pattern matching the needle as a literal substring
    pub fn pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.needle.len() + 2);
        escaped.push('%');
        for c in self.needle.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }

    fn where_clause(&self) -> String {
        let predicate = match self.criteria {
            SearchCriteria::Title => "p.title ILIKE $2",
            SearchCriteria::Content => "p.content ILIKE $2",
            SearchCriteria::Tags => {
                "EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
                 WHERE pt.post_id = p.id AND t.name ILIKE $2)"
            }
            SearchCriteria::Templates => {
                "EXISTS (SELECT 1 FROM post_templates ptm JOIN templates tm ON tm.id = ptm.template_id \
                 WHERE ptm.post_id = p.id AND tm.title ILIKE $2)"
            }
        };
        format!("p.author_id = $1 AND {}", predicate)
    }

    pub fn to_sql(&self) -> SqlResult {
        let query = [
            format!("SELECT {}", POST_COLUMNS),
            "FROM posts p JOIN users u ON u.id = p.author_id".to_string(),
            format!("WHERE {}", self.where_clause()),
            "ORDER BY p.id ASC".to_string(),
            "LIMIT $3 OFFSET $4".to_string(),
        ]
        .join(" ");

        SqlResult {
            query,
            params: vec![
                SqlParam::Int(self.author_id),
                SqlParam::Text(self.pattern()),
                SqlParam::BigInt(self.pagination.limit),
                SqlParam::BigInt(self.pagination.offset()),
            ],
        }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        SqlResult {
            query: format!("SELECT COUNT(*) AS count FROM posts p WHERE {}", self.where_clause()),
            params: vec![SqlParam::Int(self.author_id), SqlParam::Text(self.pattern())],
        }
    }
}
