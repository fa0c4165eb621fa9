use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    blog::models::{
        blog::{Blog, NewBlog, UpdateBlog},
        blog_comment::{BlogComment, NewBlogComment, UpdateBlogComment},
    },
    identity::models::identity::{Identity, Role},
    listing::{Page, SortOrder},
};

use super::{Store, StoreError};

/// In-process store with the same observable contract as `PgStore`,
/// including the `(blog_id, user_id)` uniqueness of comments.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    last_id: i32,
    identities: HashMap<i32, Identity>,
    sessions: HashMap<String, i32>,
    blogs: BTreeMap<i32, Blog>,
    comments: BTreeMap<i32, BlogComment>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

// Ids are handed out in insertion order, so id order is creation order
fn window<T: Clone>(mut rows: Vec<&T>, page: &Page) -> Vec<T> {
    if page.order == SortOrder::Newest {
        rows.reverse();
    }

    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.fetch_limit() as usize)
        .cloned()
        .collect()
}

impl MemoryStore {
    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    /// Registers an identity together with a live session, returning the
    /// identity and its session token.
    pub fn add_identity(&self, role: Role, name: &str) -> (Identity, String) {
        let mut tables = self.tables();
        let id = tables.next_id();
        let identity = Identity {
            id,
            role,
            traits: serde_json::json!({ "name": name }),
            created_at: now(),
            updated_at: now(),
        };
        let token = format!("session-{id}");

        tables.identities.insert(id, identity.clone());
        tables.sessions.insert(token.clone(), id);

        (identity, token)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn identity_by_session(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let tables = self.tables();
        Ok(tables
            .sessions
            .get(token)
            .and_then(|id| tables.identities.get(id))
            .cloned())
    }

    async fn list_blogs(&self, page: &Page) -> Result<Vec<Blog>, StoreError> {
        let tables = self.tables();
        Ok(window(tables.blogs.values().collect(), page))
    }

    async fn find_blog(&self, id: i32) -> Result<Option<Blog>, StoreError> {
        Ok(self.tables().blogs.get(&id).cloned())
    }

    async fn find_blog_by_owner(&self, user_id: i32) -> Result<Option<Blog>, StoreError> {
        Ok(self
            .tables()
            .blogs
            .values()
            .find(|blog| blog.user_id == user_id)
            .cloned())
    }

    async fn create_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let mut tables = self.tables();
        let id = tables.next_id();
        let blog = Blog {
            id,
            name: blog.name,
            description: blog.description,
            user_id: blog.user_id,
            average_rating: None,
            created_at: now(),
        };
        tables.blogs.insert(id, blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, id: i32, changes: UpdateBlog) -> Result<Option<Blog>, StoreError> {
        let mut tables = self.tables();
        Ok(tables.blogs.get_mut(&id).map(|blog| {
            if let Some(name) = changes.name {
                blog.name = name;
            }
            if let Some(description) = changes.description {
                blog.description = description;
            }
            blog.clone()
        }))
    }

    async fn delete_blog(&self, id: i32) -> Result<(), StoreError> {
        self.tables().blogs.remove(&id);
        Ok(())
    }

    async fn set_average_rating(
        &self,
        blog_id: i32,
        average_rating: Option<f64>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let blog = tables.blogs.get_mut(&blog_id).ok_or(StoreError::Missing {
            table: "blogs",
            id: blog_id,
        })?;
        blog.average_rating = average_rating;
        Ok(())
    }

    async fn list_comments(&self, page: &Page) -> Result<Vec<BlogComment>, StoreError> {
        let tables = self.tables();
        Ok(window(tables.comments.values().collect(), page))
    }

    async fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<BlogComment>, StoreError> {
        Ok(self
            .tables()
            .comments
            .values()
            .filter(|comment| comment.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn find_comment(&self, id: i32) -> Result<Option<BlogComment>, StoreError> {
        Ok(self.tables().comments.get(&id).cloned())
    }

    async fn create_comment(&self, comment: NewBlogComment) -> Result<BlogComment, StoreError> {
        let mut tables = self.tables();

        let duplicate = tables
            .comments
            .values()
            .any(|c| c.blog_id == comment.blog_id && c.user_id == comment.user_id);
        if duplicate {
            return Err(StoreError::UniqueViolation(
                "blog_comments_blog_id_user_id_key".into(),
            ));
        }

        let id = tables.next_id();
        let comment = BlogComment {
            id,
            title: comment.title,
            text: comment.text,
            rating: comment.rating,
            blog_id: comment.blog_id,
            user_id: comment.user_id,
            created_at: now(),
        };
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(
        &self,
        id: i32,
        changes: UpdateBlogComment,
    ) -> Result<Option<BlogComment>, StoreError> {
        let mut tables = self.tables();
        Ok(tables.comments.get_mut(&id).map(|comment| {
            if let Some(title) = changes.title {
                comment.title = title;
            }
            if let Some(text) = changes.text {
                comment.text = text;
            }
            if let Some(rating) = changes.rating {
                comment.rating = rating;
            }
            comment.clone()
        }))
    }

    async fn delete_comment(&self, id: i32) -> Result<(), StoreError> {
        self.tables().comments.remove(&id);
        Ok(())
    }

    async fn average_rating(&self, blog_id: i32) -> Result<Option<f64>, StoreError> {
        let tables = self.tables();
        let ratings: Vec<i32> = tables
            .comments
            .values()
            .filter(|comment| comment.blog_id == blog_id)
            .map(|comment| comment.rating)
            .collect();

        if ratings.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64,
        ))
    }
}
