use axum::{Json, debug_handler, extract::State};
use serde::Deserialize;

use crate::{
    App,
    error::{ApiError, AppError},
    extract::Path,
    identity::AuthUser,
    policy::{Action, BLOG_AUTHORS, PRIVILEGED, authorize_owner, authorize_roles},
    response::Envelope,
};

use super::{
    DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS, blog_not_found,
    models::blog::{Blog, UpdateBlog},
    optional_text,
};

#[debug_handler]
pub async fn update_blog(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(identity): AuthUser,
    crate::json::Json(patch): crate::json::Json<BlogPatch>,
) -> Result<Json<Envelope<Blog>>, AppError> {
    authorize_roles(&identity, BLOG_AUTHORS)?;

    let blog = ctx.store.find_blog(id).await?.ok_or_else(|| blog_not_found(id))?;

    authorize_owner(&identity, blog.user_id, PRIVILEGED, Action::Update, "blog")?;

    let changes = patch.validate()?;
    if changes.is_empty() {
        return Ok(Json(Envelope::new(blog)));
    }

    let blog = ctx
        .store
        .update_blog(id, changes)
        .await?
        .ok_or_else(|| blog_not_found(id))?;

    Ok(Json(Envelope::new(blog)))
}

#[derive(Deserialize, Debug)]
pub struct BlogPatch {
    name: Option<String>,
    description: Option<String>,
}

impl BlogPatch {
    fn validate(self) -> Result<UpdateBlog, ApiError> {
        Ok(UpdateBlog {
            name: optional_text(self.name, NAME_MAX_CHARS, "Please add a name", "Name")?,
            description: optional_text(
                self.description,
                DESCRIPTION_MAX_CHARS,
                "Please add a description",
                "Description",
            )?,
        })
    }
}
