//! Invite link DTOs - Link di invito a uso limitato

use crate::entities::CircleInviteLink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteLinkDTO {
    pub id: String,
    pub circle_id: String,
    pub code: String,
    pub max_uses: i64,
    pub used_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub creator_id: String,
}

impl From<CircleInviteLink> for InviteLinkDTO {
    fn from(value: CircleInviteLink) -> Self {
        Self {
            id: value.id,
            circle_id: value.circle_id,
            code: value.code,
            max_uses: value.max_uses,
            used_count: value.used_count,
            expires_at: value.expires_at,
            created_at: value.created_at,
            creator_id: value.creator_id,
        }
    }
}

/// Body di `POST /api/circles/{id}/invites`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteLinkRequestDTO {
    #[validate(range(min = 1, message = "maxUses must be at least 1"))]
    pub max_uses: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateInviteLinkDTO {
    pub circle_id: String,
    pub code: String,
    pub max_uses: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub creator_id: String,
}
