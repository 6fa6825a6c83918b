//! CircleMember entity - Appartenenza di un utente a un circle

use super::enums::{MemberRole, MemberStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct CircleMember {
    pub id: String,
    pub circle_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}

impl CircleMember {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
