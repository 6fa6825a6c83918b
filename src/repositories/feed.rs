//! FeedRepository - Repository per i post del feed degli eventi

use super::Create;
use crate::dtos::CreateFeedItemDTO;
use crate::entities::EventFeedItem;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedItemWithUser {
    #[sqlx(flatten)]
    pub item: EventFeedItem,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

// FEED REPOSITORY
pub struct FeedRepository {
    connection_pool: SqlitePool,
}

impl FeedRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Post di un invito, più recenti prima
    #[instrument(skip(self))]
    pub async fn list_with_users(&self, invite_id: &str) -> Result<Vec<FeedItemWithUser>, Error> {
        debug!("Listing feed items");
        sqlx::query_as::<_, FeedItemWithUser>(
            r#"
            SELECT f.*, u.name AS user_name, u.image AS user_image
            FROM event_feed_items f
            JOIN users u ON u.id = f.user_id
            WHERE f.invite_id = ?
            ORDER BY f.created_at DESC, f.rowid DESC
            "#,
        )
        .bind(invite_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<EventFeedItem, CreateFeedItemDTO> for FeedRepository {
    #[instrument(skip(self, data), fields(invite_id = %data.invite_id, user_id = %data.user_id))]
    async fn create(&self, data: &CreateFeedItemDTO) -> Result<EventFeedItem, Error> {
        debug!("Creating feed item");
        let item = EventFeedItem {
            id: Uuid::new_v4().to_string(),
            invite_id: data.invite_id.clone(),
            user_id: data.user_id.clone(),
            content: data.content.clone(),
            item_type: data.item_type,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO event_feed_items (id, invite_id, user_id, content, type, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.invite_id)
        .bind(&item.user_id)
        .bind(&item.content)
        .bind(item.item_type)
        .bind(item.created_at)
        .execute(&self.connection_pool)
        .await?;

        info!("Feed item created with id {}", item.id);
        Ok(item)
    }
}
