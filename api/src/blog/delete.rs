use axum::{Json, debug_handler, extract::State};

use crate::{
    App,
    error::AppError,
    extract::Path,
    identity::AuthUser,
    policy::{Action, BLOG_AUTHORS, PRIVILEGED, authorize_owner, authorize_roles},
    response::{Empty, Envelope},
};

use super::blog_not_found;

/// Comments of the deleted blog are left behind.
#[debug_handler]
pub async fn delete_blog(
    State(ctx): State<App>,
    Path(id): Path<i32>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Envelope<Empty>>, AppError> {
    authorize_roles(&identity, BLOG_AUTHORS)?;

    let blog = ctx.store.find_blog(id).await?.ok_or_else(|| blog_not_found(id))?;

    authorize_owner(&identity, blog.user_id, PRIVILEGED, Action::Delete, "blog")?;

    ctx.store.delete_blog(id).await?;
    tracing::info!(blog_id = id, user_id = identity.id, "Blog deleted");

    Ok(Json(Envelope::new(Empty {})))
}
