use axum::{Json, extract::State};

use crate::{
    App,
    blog::models::blog_comment::BlogComment,
    error::AppError,
    extract::{Path, Query},
    listing::{ListQuery, Page, paginate},
    response::Envelope,
};

use super::{CommentDetail, comment_not_found};

/// `GET /blogs/{id}/comments`, every comment of one blog.
pub async fn get_blog_comments(
    State(ctx): State<App>,
    Path(blog_id): Path<i32>,
) -> Result<Json<Envelope<Vec<BlogComment>>>, AppError> {
    let comments = ctx.store.comments_for_blog(blog_id).await?;

    Ok(Json(Envelope::counted(comments)))
}

/// `GET /comments`, all comments across blogs, one page at a time.
pub async fn list_comments(
    State(ctx): State<App>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<BlogComment>>>, AppError> {
    let page = Page::from(&q);
    let rows = ctx.store.list_comments(&page).await?;
    let (comments, pagination) = paginate(&page, rows);

    Ok(Json(Envelope::paginated(comments, pagination)))
}

pub async fn get_comment(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<CommentDetail>>, AppError> {
    let comment = ctx
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    let blog = ctx.store.find_blog(comment.blog_id).await?;

    Ok(Json(Envelope::new(CommentDetail {
        comment,
        blog: blog.map(Into::into),
    })))
}
