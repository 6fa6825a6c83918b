//! User DTOs - Data Transfer Objects per utenti e profili

use crate::entities::{ProfileVisibility, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profilo completo dell'utente, esposto dalle rotte `/users`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub profile_visibility: ProfileVisibility,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            image: value.image,
            bio: value.bio,
            profile_visibility: value.profile_visibility,
            created_at: value.created_at,
        }
    }
}

/// Vista ridotta di un utente usata quando è annidato in altre risorse
/// (owner di un circle, mittente di un invito, autore di un post...)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummaryDTO {
    pub id: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<User> for UserSummaryDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image: value.image,
        }
    }
}

/// Body di `POST /api/auth/sync`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequestDTO {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
}

/// DTO per l'upsert di un utente (chiave: email)
#[derive(Debug, Clone)]
pub struct UpsertUserDTO {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
}

/// DTO per aggiornare il profilo (solo i campi `Some(_)` vengono modificati)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDTO {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    pub profile_visibility: Option<ProfileVisibility>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDTO {
    pub circles_owned: i64,
    pub circles_joined: i64,
    pub events_created: i64,
    pub events_attended: i64,
    pub rsvp_response_rate: f64,
    pub posts_shared: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserProfileDTO {
    pub user: UserDTO,
    pub stats: UserStatsDTO,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SuccessDTO {
    pub success: bool,
}
