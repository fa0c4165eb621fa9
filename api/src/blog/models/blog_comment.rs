use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::blog_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlogComment {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub blog_id: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::blog_comments)]
pub struct NewBlogComment {
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub blog_id: i32,
    pub user_id: i32,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = crate::schema::blog_comments)]
pub struct UpdateBlogComment {
    pub title: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
}

impl UpdateBlogComment {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.rating.is_none()
    }
}
