pub mod blog;
pub mod blog_comment;
