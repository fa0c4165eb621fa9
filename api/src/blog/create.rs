use axum::{debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    App,
    error::{ApiError, AppError},
    identity::AuthUser,
    policy::{BLOG_AUTHORS, authorize_roles},
    response::Envelope,
};

use super::{
    DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS,
    models::blog::{Blog, NewBlog},
    required_text,
};

#[debug_handler]
pub async fn create_blog(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    crate::json::Json(blog): crate::json::Json<BlogSubmission>,
) -> Result<(StatusCode, axum::Json<Envelope<Blog>>), AppError> {
    authorize_roles(&identity, BLOG_AUTHORS)?;

    let blog = blog.validate(identity.id)?;

    // Everyone but admins gets a single blog
    if !identity.is_admin() && ctx.store.find_blog_by_owner(identity.id).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "The user with ID {} has already published a blog",
            identity.id
        ))
        .into());
    }

    let blog = ctx.store.create_blog(blog).await?;
    tracing::info!(blog_id = blog.id, user_id = identity.id, "Blog created");

    Ok((StatusCode::CREATED, axum::Json(Envelope::new(blog))))
}

/// Anything else in the body, `average_rating` included, is ignored.
#[derive(Deserialize, Debug)]
pub struct BlogSubmission {
    name: Option<String>,
    description: Option<String>,
}

impl BlogSubmission {
    fn validate(self, user_id: i32) -> Result<NewBlog, ApiError> {
        Ok(NewBlog {
            name: required_text(self.name, NAME_MAX_CHARS, "Please add a name", "Name")?,
            description: required_text(
                self.description,
                DESCRIPTION_MAX_CHARS,
                "Please add a description",
                "Description",
            )?,
            user_id,
        })
    }
}
