//! InviteRepository - Repository per la gestione degli inviti (eventi)

use super::{Create, Delete, Read};
use crate::dtos::CreateInviteDTO;
use crate::entities::Invite;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Invito con mittente, circle e numero di RSVP
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InviteOverview {
    #[sqlx(flatten)]
    pub invite: Invite,
    pub sender_name: Option<String>,
    pub sender_image: Option<String>,
    pub circle_name: Option<String>,
    pub rsvp_count: i64,
}

const OVERVIEW_SELECT: &str = r#"
    SELECT
        i.*,
        s.name AS sender_name,
        s.image AS sender_image,
        c.name AS circle_name,
        (SELECT COUNT(*) FROM rsvps r WHERE r.invite_id = i.id) AS rsvp_count
    FROM invites i
    JOIN users s ON s.id = i.sender_id
    LEFT JOIN circles c ON c.id = i.circle_id
"#;

// INVITE REPOSITORY
pub struct InviteRepository {
    connection_pool: SqlitePool,
}

impl InviteRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Inviti visibili all'utente: quelli che ha inviato e quelli dei circle di cui ha
    /// una membership (in qualunque stato). Ogni invito compare una sola volta.
    #[instrument(skip(self))]
    pub async fn list_visible_for_user(&self, user_id: &str) -> Result<Vec<InviteOverview>, Error> {
        debug!("Listing invites visible to user");
        let query = format!(
            r#"{OVERVIEW_SELECT}
            WHERE i.sender_id = ?
               OR EXISTS (
                    SELECT 1 FROM circle_members m
                    WHERE m.circle_id = i.circle_id AND m.user_id = ?
               )
            ORDER BY i.event_date ASC, i.rowid ASC"#
        );
        let invites = sqlx::query_as::<_, InviteOverview>(&query)
            .bind(user_id)
            .bind(user_id)
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Found {} invites", invites.len());
        Ok(invites)
    }

    /// Inviti di un circle, dal più lontano nel futuro al più vicino
    #[instrument(skip(self))]
    pub async fn list_by_circle(&self, circle_id: &str) -> Result<Vec<InviteOverview>, Error> {
        debug!("Listing invites of circle");
        let query = format!(
            "{OVERVIEW_SELECT} WHERE i.circle_id = ? ORDER BY i.event_date DESC, i.rowid DESC"
        );
        sqlx::query_as::<_, InviteOverview>(&query)
            .bind(circle_id)
            .fetch_all(&self.connection_pool)
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_overview(&self, invite_id: &str) -> Result<Option<InviteOverview>, Error> {
        let query = format!("{OVERVIEW_SELECT} WHERE i.id = ?");
        sqlx::query_as::<_, InviteOverview>(&query)
            .bind(invite_id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Create<Invite, CreateInviteDTO> for InviteRepository {
    #[instrument(skip(self, data), fields(sender_id = %data.sender_id))]
    async fn create(&self, data: &CreateInviteDTO) -> Result<Invite, Error> {
        debug!("Creating new invite");
        let now = Utc::now();
        let invite = Invite {
            id: Uuid::new_v4().to_string(),
            title: data.title.clone(),
            description: data.description.clone(),
            location: data.location.clone(),
            event_date: data.event_date,
            sender_id: data.sender_id.clone(),
            circle_id: data.circle_id.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO invites (id, title, description, location, event_date, sender_id, circle_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invite.id)
        .bind(&invite.title)
        .bind(&invite.description)
        .bind(&invite.location)
        .bind(invite.event_date)
        .bind(&invite.sender_id)
        .bind(&invite.circle_id)
        .bind(invite.created_at)
        .bind(invite.updated_at)
        .execute(&self.connection_pool)
        .await?;

        info!("Invite created with id {}", invite.id);
        Ok(invite)
    }
}

impl Read<Invite, String> for InviteRepository {
    #[instrument(skip(self), fields(invite_id = %id))]
    async fn read(&self, id: &String) -> Result<Option<Invite>, Error> {
        debug!("Reading invite by id");
        sqlx::query_as::<_, Invite>("SELECT * FROM invites WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete<String> for InviteRepository {
    /// RSVP, post e media vengono rimossi in cascata dallo schema
    #[instrument(skip(self), fields(invite_id = %id))]
    async fn delete(&self, id: &String) -> Result<u64, Error> {
        debug!("Deleting invite");
        let result = sqlx::query("DELETE FROM invites WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Invite deleted ({} rows)", result.rows_affected());
        Ok(result.rows_affected())
    }
}
