use crate::store::Store;

/// Recomputes the blog's average rating from its current comments and writes
/// it back. `None` is written when the blog has no comments left.
///
/// Called once after every successful comment create, update and delete.
/// The comment mutation has already committed at that point, so failures are
/// logged and swallowed instead of failing the request. Concurrent mutations
/// on the same blog race here and the last write wins.
pub async fn recompute_average_rating(store: &dyn Store, blog_id: i32) {
    let average_rating = match store.average_rating(blog_id).await {
        Ok(average_rating) => average_rating,
        Err(err) => {
            tracing::error!(blog_id, ?err, "Failed to aggregate comment ratings");
            return;
        }
    };

    match store.set_average_rating(blog_id, average_rating).await {
        Ok(()) => tracing::debug!(blog_id, ?average_rating, "Average rating updated"),
        Err(err) => tracing::error!(blog_id, ?err, "Failed to write back average rating"),
    }
}
