//! MediaRepository - Repository per i riferimenti ai media caricati

use super::Create;
use crate::dtos::CreateMediaItemDTO;
use crate::entities::MediaItem;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

// MEDIA REPOSITORY
pub struct MediaRepository {
    connection_pool: SqlitePool,
}

impl MediaRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn list_by_invite(&self, invite_id: &str) -> Result<Vec<MediaItem>, Error> {
        debug!("Listing media items");
        sqlx::query_as::<_, MediaItem>(
            "SELECT * FROM media_items WHERE invite_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(invite_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<MediaItem, CreateMediaItemDTO> for MediaRepository {
    #[instrument(skip(self, data), fields(invite_id = %data.invite_id, user_id = %data.user_id))]
    async fn create(&self, data: &CreateMediaItemDTO) -> Result<MediaItem, Error> {
        debug!("Recording media item");
        let item = MediaItem {
            id: Uuid::new_v4().to_string(),
            invite_id: data.invite_id.clone(),
            user_id: data.user_id.clone(),
            url: data.url.clone(),
            media_type: data.media_type,
            caption: data.caption.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO media_items (id, invite_id, user_id, url, type, caption, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.invite_id)
        .bind(&item.user_id)
        .bind(&item.url)
        .bind(item.media_type)
        .bind(&item.caption)
        .bind(item.created_at)
        .execute(&self.connection_pool)
        .await?;

        info!("Media item recorded with id {}", item.id);
        Ok(item)
    }
}
