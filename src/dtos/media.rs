//! Media DTOs - Riferimenti ai file caricati

use crate::entities::{MediaItem, MediaType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemDTO {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MediaItem> for MediaItemDTO {
    fn from(value: MediaItem) -> Self {
        Self {
            id: value.id,
            invite_id: value.invite_id,
            user_id: value.user_id,
            url: value.url,
            media_type: value.media_type,
            caption: value.caption,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMediaItemDTO {
    pub invite_id: String,
    pub user_id: String,
    pub url: String,
    pub media_type: MediaType,
    pub caption: Option<String>,
}
