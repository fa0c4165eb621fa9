use async_trait::async_trait;
use diesel::{
    dsl::{now, sql},
    prelude::*,
    sql_types::{Float8, Nullable},
};
use diesel_async::{
    AsyncPgConnection, RunQueryDsl,
    pooled_connection::{
        AsyncDieselConnectionManager,
        deadpool::{BuildError, Object, Pool},
    },
};

use crate::{
    blog::models::{
        blog::{Blog, NewBlog, UpdateBlog},
        blog_comment::{BlogComment, NewBlogComment, UpdateBlogComment},
    },
    identity::models::identity::Identity,
    listing::{Page, SortOrder},
    schema::{blog_comments, blogs, identities, sessions},
};

use super::{Store, StoreError};

pub struct PgStore {
    diesel: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn connect(database_url: &str, max_connections: usize) -> Result<Self, BuildError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let diesel = Pool::builder(manager).max_size(max_connections).build()?;

        Ok(PgStore { diesel })
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        Ok(self.diesel.get().await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn identity_by_session(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(sessions::table
            .inner_join(identities::table)
            .filter(sessions::token.eq(token))
            .filter(sessions::active.eq(true))
            .filter(sessions::expires_at.gt(now))
            .filter(sessions::issued_at.le(now))
            .select(Identity::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn list_blogs(&self, page: &Page) -> Result<Vec<Blog>, StoreError> {
        let mut conn = self.conn().await?;

        let query = blogs::table.select(Blog::as_select()).into_boxed();
        let query = match page.order {
            SortOrder::Newest => query.order((blogs::created_at.desc(), blogs::id.desc())),
            SortOrder::Oldest => query.order((blogs::created_at.asc(), blogs::id.asc())),
        };

        Ok(query
            .limit(page.fetch_limit())
            .offset(page.offset())
            .load(&mut conn)
            .await?)
    }

    async fn find_blog(&self, id: i32) -> Result<Option<Blog>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(blogs::table
            .find(id)
            .select(Blog::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_blog_by_owner(&self, user_id: i32) -> Result<Option<Blog>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(blogs::table
            .filter(blogs::user_id.eq(user_id))
            .select(Blog::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn create_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::insert_into(blogs::table)
            .values(&blog)
            .returning(Blog::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_blog(&self, id: i32, changes: UpdateBlog) -> Result<Option<Blog>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::update(blogs::table.find(id))
            .set(&changes)
            .returning(Blog::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?)
    }

    async fn delete_blog(&self, id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        diesel::delete(blogs::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn set_average_rating(
        &self,
        blog_id: i32,
        average_rating: Option<f64>,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        let updated = diesel::update(blogs::table.find(blog_id))
            .set(blogs::average_rating.eq(average_rating))
            .execute(&mut conn)
            .await?;

        if updated == 0 {
            return Err(StoreError::Missing {
                table: "blogs",
                id: blog_id,
            });
        }

        Ok(())
    }

    async fn list_comments(&self, page: &Page) -> Result<Vec<BlogComment>, StoreError> {
        let mut conn = self.conn().await?;

        let query = blog_comments::table
            .select(BlogComment::as_select())
            .into_boxed();
        let query = match page.order {
            SortOrder::Newest => query.order((
                blog_comments::created_at.desc(),
                blog_comments::id.desc(),
            )),
            SortOrder::Oldest => query.order((
                blog_comments::created_at.asc(),
                blog_comments::id.asc(),
            )),
        };

        Ok(query
            .limit(page.fetch_limit())
            .offset(page.offset())
            .load(&mut conn)
            .await?)
    }

    async fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<BlogComment>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(blog_comments::table
            .filter(blog_comments::blog_id.eq(blog_id))
            .order(blog_comments::id.asc())
            .select(BlogComment::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn find_comment(&self, id: i32) -> Result<Option<BlogComment>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(blog_comments::table
            .find(id)
            .select(BlogComment::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn create_comment(&self, comment: NewBlogComment) -> Result<BlogComment, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::insert_into(blog_comments::table)
            .values(&comment)
            .returning(BlogComment::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_comment(
        &self,
        id: i32,
        changes: UpdateBlogComment,
    ) -> Result<Option<BlogComment>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::update(blog_comments::table.find(id))
            .set(&changes)
            .returning(BlogComment::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?)
    }

    async fn delete_comment(&self, id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        diesel::delete(blog_comments::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn average_rating(&self, blog_id: i32) -> Result<Option<f64>, StoreError> {
        let mut conn = self.conn().await?;

        // AVG over an integer column is NUMERIC in postgres
        Ok(blog_comments::table
            .filter(blog_comments::blog_id.eq(blog_id))
            .select(sql::<Nullable<Float8>>("AVG(rating)::float8"))
            .get_result::<Option<f64>>(&mut conn)
            .await?)
    }
}
