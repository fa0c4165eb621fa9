use axum::{debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    App,
    blog::{
        models::blog_comment::{BlogComment, NewBlogComment},
        rating::recompute_average_rating,
        required_text,
    },
    error::{ApiError, AppError},
    extract::Path,
    identity::AuthUser,
    policy::{COMMENT_AUTHORS, authorize_roles},
    response::Envelope,
};

use super::{RATING_INVALID, TEXT_MISSING, TITLE_MAX_CHARS, TITLE_MISSING, validate_rating};

#[debug_handler]
pub async fn create_comment(
    State(ctx): State<App>,
    Path(blog_id): Path<i32>,
    AuthUser(identity): AuthUser,
    crate::json::Json(comment): crate::json::Json<CommentSubmission>,
) -> Result<(StatusCode, axum::Json<Envelope<BlogComment>>), AppError> {
    authorize_roles(&identity, COMMENT_AUTHORS)?;

    if ctx.store.find_blog(blog_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("No blog with the id of {blog_id}")).into());
    }

    let comment = comment.validate(blog_id, identity.id)?;

    // A second comment by the same user on this blog violates the unique
    // (blog_id, user_id) index and surfaces as a conflict
    let comment = ctx.store.create_comment(comment).await?;

    recompute_average_rating(ctx.store.as_ref(), comment.blog_id).await;

    Ok((StatusCode::CREATED, axum::Json(Envelope::new(comment))))
}

#[derive(Deserialize, Debug)]
pub struct CommentSubmission {
    title: Option<String>,
    text: Option<String>,
    rating: Option<i32>,
}

impl CommentSubmission {
    fn validate(self, blog_id: i32, user_id: i32) -> Result<NewBlogComment, ApiError> {
        Ok(NewBlogComment {
            title: required_text(self.title, TITLE_MAX_CHARS, TITLE_MISSING, "Title")?,
            text: required_text(self.text, usize::MAX, TEXT_MISSING, "Text")?,
            rating: validate_rating(
                self.rating
                    .ok_or_else(|| ApiError::Validation(RATING_INVALID.into()))?,
            )?,
            blog_id,
            user_id,
        })
    }
}
