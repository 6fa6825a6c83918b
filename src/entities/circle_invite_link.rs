//! CircleInviteLink entity - Link di invito a uso limitato con approvazione automatica

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct CircleInviteLink {
    pub id: String,
    pub circle_id: String,
    pub code: String,
    pub max_uses: i64,
    pub used_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub creator_id: String,
}

impl CircleInviteLink {
    pub fn is_exhausted(&self) -> bool {
        self.used_count >= self.max_uses
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
