use axum::{Json, extract::State};

use crate::{
    App,
    error::AppError,
    extract::{Path, Query},
    listing::{ListQuery, Page, paginate},
    response::Envelope,
};

use super::{blog_not_found, models::blog::Blog};

pub async fn list_blogs(
    State(ctx): State<App>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<Blog>>>, AppError> {
    let page = Page::from(&q);
    let rows = ctx.store.list_blogs(&page).await?;
    let (blogs, pagination) = paginate(&page, rows);

    Ok(Json(Envelope::paginated(blogs, pagination)))
}

pub async fn get_blog(
    State(ctx): State<App>,
    Path(id): Path<i32>,
) -> Result<Json<Envelope<Blog>>, AppError> {
    let blog = ctx.store.find_blog(id).await?.ok_or_else(|| blog_not_found(id))?;

    Ok(Json(Envelope::new(blog)))
}
