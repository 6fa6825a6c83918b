//! MediaItem entity - Riferimento a un file caricato per un evento

use super::enums::MediaType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct MediaItem {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub url: String,
    #[sqlx(rename = "type")]
    pub media_type: MediaType,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}
