pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use serde::Serialize;

use crate::error::ApiError;

use super::models::{blog::BlogSummary, blog_comment::BlogComment};

pub const TITLE_MAX_CHARS: usize = 100;
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

const TITLE_MISSING: &str = "Please add a title for the Comment";
const TEXT_MISSING: &str = "Please add some text";
const RATING_INVALID: &str = "Please add a rating between 1 and 10";

fn comment_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("No comment found with the id of {id}"))
}

fn validate_rating(rating: i32) -> Result<i32, ApiError> {
    if RATING_RANGE.contains(&rating) {
        Ok(rating)
    } else {
        Err(ApiError::Validation(RATING_INVALID.into()))
    }
}

/// A single comment as returned by `GET /comments/{id}`, with a summary of
/// the blog it belongs to. `blog` is null once the blog has been deleted.
#[derive(Debug, Serialize, Clone)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: BlogComment,
    pub blog: Option<BlogSummary>,
}
