//! EventFeedItem entity - Post nel feed di un evento

use super::enums::FeedItemType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct EventFeedItem {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub content: String,
    #[sqlx(rename = "type")]
    pub item_type: FeedItemType,
    pub created_at: DateTime<Utc>,
}
