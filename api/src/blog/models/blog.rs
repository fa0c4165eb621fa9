use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Blog {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub user_id: i32,
    /// Mean rating of the blog's comments, `None` while it has none. Only
    /// ever written by the rating aggregator.
    pub average_rating: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog {
    pub name: String,
    pub description: String,
    pub user_id: i32,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = crate::schema::blogs)]
pub struct UpdateBlog {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateBlog {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// The part of a blog embedded into a single comment response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BlogSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<Blog> for BlogSummary {
    fn from(blog: Blog) -> Self {
        BlogSummary {
            id: blog.id,
            name: blog.name,
            description: blog.description,
        }
    }
}
