pub mod comment;
pub mod post;
pub mod tag;
pub mod template;
pub mod user;

pub use comment::Comment;
pub use post::{AuthorName, Post, PostRow, PostSummary, TagName};
pub use tag::Tag;
pub use template::Template;
pub use user::User;
