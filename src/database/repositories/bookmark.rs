//! Bookmark repository implementation

use sqlx::PgPool;
use crate::models::bookmark::{Bookmark, BookmarkToggle};
use crate::utils::errors::Result;
use crate::utils::helpers::generate_uuid;

#[derive(Debug, Clone)]
pub struct BookmarkRepository {
    pool: PgPool,
}

impl BookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove the bookmark if present, otherwise add it
    pub async fn toggle(&self, user_id: &str, event_id: &str) -> Result<BookmarkToggle> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO bookmarks (id, user_id, event_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, event_id) DO NOTHING
                "#,
            )
            .bind(generate_uuid())
            .bind(user_id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(BookmarkToggle {
            event_id: event_id.to_string(),
            bookmarked: removed == 0,
        })
    }

    /// A user's bookmark of an event, if any
    pub async fn find(&self, user_id: &str, event_id: &str) -> Result<Option<Bookmark>> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "SELECT id, user_id, event_id FROM bookmarks WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bookmark)
    }
}
