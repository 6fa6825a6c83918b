//! Circle entity - Entità gruppo privato di utenti

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Circle {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Codice generale del circle, ruotabile dal proprietario
    pub invite_code: String,
    pub is_invite_link_enabled: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
