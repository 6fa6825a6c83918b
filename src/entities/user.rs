//! User entity - Entità utente sincronizzata dall'identity provider

use super::enums::ProfileVisibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub profile_visibility: ProfileVisibility,
    pub created_at: DateTime<Utc>,
}
