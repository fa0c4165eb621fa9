use axum::{Json, debug_handler, extract::State};

use crate::{
    App,
    blog::rating::recompute_average_rating,
    error::AppError,
    extract::Path,
    identity::AuthUser,
    policy::{Action, COMMENT_AUTHORS, PRIVILEGED, authorize_owner, authorize_roles},
    response::{Empty, Envelope},
};

use super::comment_not_found;

#[debug_handler]
pub async fn delete_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Envelope<Empty>>, AppError> {
    authorize_roles(&identity, COMMENT_AUTHORS)?;

    let comment = ctx
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    authorize_owner(&identity, comment.user_id, PRIVILEGED, Action::Delete, "comment")?;

    ctx.store.delete_comment(id).await?;

    // The blog id comes from the record read before the delete
    recompute_average_rating(ctx.store.as_ref(), comment.blog_id).await;

    Ok(Json(Envelope::new(Empty {})))
}
