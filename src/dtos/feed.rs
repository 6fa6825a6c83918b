//! Feed DTOs - Post nel feed di un evento

use super::user::UserSummaryDTO;
use crate::entities::{EventFeedItem, FeedItemType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemDTO {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub item_type: FeedItemType,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDTO>,
}

impl From<EventFeedItem> for FeedItemDTO {
    fn from(value: EventFeedItem) -> Self {
        Self {
            id: value.id,
            invite_id: value.invite_id,
            user_id: value.user_id,
            content: value.content,
            item_type: value.item_type,
            created_at: value.created_at,
            user: None,
        }
    }
}

/// Body di `POST /api/feed`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequestDTO {
    #[validate(length(min = 1, message = "inviteId is required"))]
    pub invite_id: String,
    #[validate(length(min = 1, max = 5000, message = "Content must be between 1 and 5000 characters"))]
    pub content: String,
    #[serde(rename = "type")]
    pub item_type: Option<FeedItemType>,
}

#[derive(Debug, Clone)]
pub struct CreateFeedItemDTO {
    pub invite_id: String,
    pub user_id: String,
    pub content: String,
    pub item_type: FeedItemType,
}
