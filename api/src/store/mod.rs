use async_trait::async_trait;
use diesel::result::DatabaseErrorKind;

use crate::{
    blog::models::{
        blog::{Blog, NewBlog, UpdateBlog},
        blog_comment::{BlogComment, NewBlogComment, UpdateBlogComment},
    },
    identity::models::identity::Identity,
    listing::Page,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("duplicate value violates unique constraint `{0}`")]
    UniqueViolation(String),

    #[error("no row in `{table}` with id {id}")]
    Missing { table: &'static str, id: i32 },

    #[error(transparent)]
    Query(diesel::result::Error),

    #[error(transparent)]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueViolation(info.constraint_name().unwrap_or("unknown").to_owned())
            }
            e => StoreError::Query(e),
        }
    }
}

/// Persistence for blogs, comments and the identities acting on them.
///
/// Lookups by id return `Ok(None)` when nothing matches, it's up to the
/// handler to turn that into a 404. Updates return the record as stored
/// after the write.
#[async_trait]
pub trait Store: Send + Sync {
    /// Resolves an active, unexpired session token to its identity.
    async fn identity_by_session(&self, token: &str) -> Result<Option<Identity>, StoreError>;

    async fn list_blogs(&self, page: &Page) -> Result<Vec<Blog>, StoreError>;
    async fn find_blog(&self, id: i32) -> Result<Option<Blog>, StoreError>;
    async fn find_blog_by_owner(&self, user_id: i32) -> Result<Option<Blog>, StoreError>;
    async fn create_blog(&self, blog: NewBlog) -> Result<Blog, StoreError>;
    async fn update_blog(&self, id: i32, changes: UpdateBlog) -> Result<Option<Blog>, StoreError>;
    /// Leaves the blog's comments in place.
    async fn delete_blog(&self, id: i32) -> Result<(), StoreError>;
    /// Fails with [`StoreError::Missing`] when the blog is gone.
    async fn set_average_rating(
        &self,
        blog_id: i32,
        average_rating: Option<f64>,
    ) -> Result<(), StoreError>;

    async fn list_comments(&self, page: &Page) -> Result<Vec<BlogComment>, StoreError>;
    async fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<BlogComment>, StoreError>;
    async fn find_comment(&self, id: i32) -> Result<Option<BlogComment>, StoreError>;
    /// Fails with [`StoreError::UniqueViolation`] when the user already
    /// commented on the blog.
    async fn create_comment(&self, comment: NewBlogComment) -> Result<BlogComment, StoreError>;
    async fn update_comment(
        &self,
        id: i32,
        changes: UpdateBlogComment,
    ) -> Result<Option<BlogComment>, StoreError>;
    async fn delete_comment(&self, id: i32) -> Result<(), StoreError>;
    /// Mean of `rating` over the blog's comments, `None` when there are none.
    async fn average_rating(&self, blog_id: i32) -> Result<Option<f64>, StoreError>;
}
