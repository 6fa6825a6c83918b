//! Circle DTOs - Data Transfer Objects per circle e membership

use super::invite::InviteSummaryDTO;
use super::user::UserSummaryDTO;
use crate::entities::{Circle, CircleMember, MemberRole, MemberStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CircleDTO {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub invite_code: String,
    pub is_invite_link_enabled: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Circle> for CircleDTO {
    fn from(value: Circle) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            invite_code: value.invite_code,
            is_invite_link_enabled: value.is_invite_link_enabled,
            owner_id: value.owner_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body di `POST /api/circles`
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateCircleRequestDTO {
    #[validate(length(min = 1, max = 100, message = "Circle name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// DTO per creare un nuovo circle (senza id, generato dal repository)
#[derive(Debug, Clone)]
pub struct CreateCircleDTO {
    pub name: String,
    pub description: Option<String>,
    pub invite_code: String,
    pub owner_id: String,
}

/// Body di `PATCH /api/circles/{id}/settings`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCircleSettingsDTO {
    pub is_invite_link_enabled: Option<bool>,
}

/// Elemento di `GET /api/circles`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CircleSummaryDTO {
    pub circle: CircleDTO,
    pub owner: UserSummaryDTO,
    pub member_count: i64,
}

/// Anteprima pubblica di un circle raggiunto tramite codice
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CirclePreviewDTO {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: UserSummaryDTO,
    pub member_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CircleMemberDTO {
    pub id: String,
    pub circle_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub user: UserSummaryDTO,
}

impl CircleMemberDTO {
    pub fn new(member: CircleMember, user: UserSummaryDTO) -> Self {
        Self {
            id: member.id,
            circle_id: member.circle_id,
            user_id: member.user_id,
            role: member.role,
            status: member.status,
            joined_at: member.joined_at,
            user,
        }
    }
}

/// Risposta di `GET /api/circles/{id}`
///
/// Per i membri PENDING `members` e `invites` sono sempre vuoti.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CircleDetailsDTO {
    pub circle: CircleDTO,
    pub owner: UserSummaryDTO,
    pub members: Vec<CircleMemberDTO>,
    pub invites: Vec<InviteSummaryDTO>,
    pub current_user_status: MemberStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteCodeDTO {
    pub invite_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinCircleResponseDTO {
    pub success: bool,
    pub circle_id: String,
}

/// DTO per inserire una nuova membership
#[derive(Debug, Clone)]
pub struct CreateCircleMemberDTO {
    pub circle_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub status: MemberStatus,
}
