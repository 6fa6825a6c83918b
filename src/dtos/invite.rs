//! Invite DTOs - Eventi, RSVP e dettagli aggregati

use super::circle::CircleMemberDTO;
use super::feed::FeedItemDTO;
use super::media::MediaItemDTO;
use super::user::UserSummaryDTO;
use crate::entities::{Invite, Rsvp, RsvpStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteDTO {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub sender_id: String,
    pub circle_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invite> for InviteDTO {
    fn from(value: Invite) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            location: value.location,
            event_date: value.event_date,
            sender_id: value.sender_id,
            circle_id: value.circle_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body di `POST /api/invites`
///
/// `title` e `eventDate` sono opzionali a livello di parsing per poter
/// rispondere con un BAD_REQUEST esplicito quando mancano.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequestDTO {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub circle_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateInviteDTO {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub sender_id: String,
    pub circle_id: Option<String>,
}

/// Riferimento minimo a un circle dentro un invito
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CircleRefDTO {
    pub id: String,
    pub name: String,
}

/// Elemento di `GET /api/invites`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteListItemDTO {
    pub invite: InviteDTO,
    pub sender: UserSummaryDTO,
    pub circle: Option<CircleRefDTO>,
    pub rsvp_count: i64,
}

/// Invito elencato nei dettagli di un circle
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InviteSummaryDTO {
    pub id: String,
    pub title: String,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub sender_id: String,
    pub rsvp_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InviteCircleDTO {
    pub id: String,
    pub name: String,
    pub members: Vec<CircleMemberDTO>,
}

/// Risposta di `GET /api/invites/{id}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InviteDetailsDTO {
    pub invite: InviteDTO,
    pub sender: UserSummaryDTO,
    pub circle: Option<InviteCircleDTO>,
    pub rsvps: Vec<RsvpDTO>,
    pub feed: Vec<FeedItemDTO>,
    pub media: Vec<MediaItemDTO>,
}

/// Body di `POST /api/invites/{id}/rsvp`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequestDTO {
    pub status: Option<RsvpStatus>,
    pub guest_count: Option<i64>,
    pub dietary: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertRsvpDTO {
    pub invite_id: String,
    pub user_id: String,
    pub status: RsvpStatus,
    pub guest_count: i64,
    pub dietary: Option<String>,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RsvpDTO {
    pub id: String,
    pub invite_id: String,
    pub user_id: String,
    pub status: RsvpStatus,
    pub guest_count: i64,
    pub dietary: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDTO>,
}

impl From<Rsvp> for RsvpDTO {
    fn from(value: Rsvp) -> Self {
        Self {
            id: value.id,
            invite_id: value.invite_id,
            user_id: value.user_id,
            status: value.status,
            guest_count: value.guest_count,
            dietary: value.dietary,
            note: value.note,
            created_at: value.created_at,
            updated_at: value.updated_at,
            user: None, // da popolare manualmente se necessario
        }
    }
}
