use axum::{Json, debug_handler, extract::State};
use serde::Deserialize;

use crate::{
    App,
    blog::{
        models::blog_comment::{BlogComment, UpdateBlogComment},
        optional_text,
        rating::recompute_average_rating,
    },
    error::{ApiError, AppError},
    extract::Path,
    identity::AuthUser,
    policy::{Action, COMMENT_AUTHORS, PRIVILEGED, authorize_owner, authorize_roles},
    response::Envelope,
};

use super::{TEXT_MISSING, TITLE_MAX_CHARS, TITLE_MISSING, comment_not_found, validate_rating};

#[debug_handler]
pub async fn update_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(identity): AuthUser,
    crate::json::Json(patch): crate::json::Json<CommentPatch>,
) -> Result<Json<Envelope<BlogComment>>, AppError> {
    authorize_roles(&identity, COMMENT_AUTHORS)?;

    let comment = ctx
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    authorize_owner(&identity, comment.user_id, PRIVILEGED, Action::Update, "comment")?;

    let changes = patch.validate()?;
    if changes.is_empty() {
        return Ok(Json(Envelope::new(comment)));
    }

    let comment = ctx
        .store
        .update_comment(id, changes)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    recompute_average_rating(ctx.store.as_ref(), comment.blog_id).await;

    Ok(Json(Envelope::new(comment)))
}

/// The blog and author of a comment never change.
#[derive(Deserialize, Debug)]
pub struct CommentPatch {
    title: Option<String>,
    text: Option<String>,
    rating: Option<i32>,
}

impl CommentPatch {
    fn validate(self) -> Result<UpdateBlogComment, ApiError> {
        Ok(UpdateBlogComment {
            title: optional_text(self.title, TITLE_MAX_CHARS, TITLE_MISSING, "Title")?,
            text: optional_text(self.text, usize::MAX, TEXT_MISSING, "Text")?,
            rating: self.rating.map(validate_rating).transpose()?,
        })
    }
}
