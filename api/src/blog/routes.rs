use axum::{Router, routing::get};

use crate::App;

use super::{
    comment::{
        create::create_comment,
        delete::delete_comment,
        get::{get_blog_comments, get_comment, list_comments},
        update::update_comment,
    },
    create::create_blog,
    delete::delete_blog,
    get::{get_blog, list_blogs},
    update::update_blog,
};

/// Mounted at `/blogs`. Comments of a blog live under `/blogs/{id}/comments`.
pub fn route() -> Router<App> {
    Router::<App>::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
        .route(
            "/{id}/comments",
            get(get_blog_comments).post(create_comment),
        )
}

/// Mounted at `/comments`.
pub fn comment_route() -> Router<App> {
    Router::<App>::new()
        .route("/", get(list_comments))
        .route(
            "/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}
