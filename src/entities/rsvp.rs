//! Rsvp entity - Risposta di un utente a un invito

use super::enums::RsvpStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Rsvp {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub status: RsvpStatus,
    pub guest_count: i64,
    pub dietary: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
