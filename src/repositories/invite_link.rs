//! InviteLinkRepository - Repository per i link di invito a uso limitato

use super::Create;
use crate::dtos::CreateInviteLinkDTO;
use crate::entities::CircleInviteLink;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// INVITE LINK REPOSITORY
pub struct InviteLinkRepository {
    connection_pool: SqlitePool,
}

impl InviteLinkRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<CircleInviteLink>, Error> {
        debug!("Finding invite link by code");
        sqlx::query_as::<_, CircleInviteLink>("SELECT * FROM circle_invite_links WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Link ancora utilizzabili (non esauriti) di un circle, più recenti prima
    #[instrument(skip(self))]
    pub async fn list_available(&self, circle_id: &str) -> Result<Vec<CircleInviteLink>, Error> {
        debug!("Listing available invite links");
        sqlx::query_as::<_, CircleInviteLink>(
            r#"
            SELECT * FROM circle_invite_links
            WHERE circle_id = ? AND used_count < max_uses
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(circle_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Incrementa il contatore di utilizzi senza mai superare `max_uses`.
    /// Ritorna `false` se il link era già esaurito (o non esiste più).
    #[instrument(skip(self))]
    pub async fn increment_usage(&self, link_id: &str) -> Result<bool, Error> {
        debug!("Incrementing invite link usage");
        let result = sqlx::query(
            r#"
            UPDATE circle_invite_links
            SET used_count = used_count + 1
            WHERE id = ? AND used_count < max_uses
            "#,
        )
        .bind(link_id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!("Invite link usage not incremented (exhausted or missing)");
            return Ok(false);
        }
        Ok(true)
    }

    /// Elimina un link solo se appartiene al circle indicato
    #[instrument(skip(self))]
    pub async fn delete_in_circle(&self, circle_id: &str, link_id: &str) -> Result<u64, Error> {
        debug!("Deleting invite link");
        let result = sqlx::query("DELETE FROM circle_invite_links WHERE id = ? AND circle_id = ?")
            .bind(link_id)
            .bind(circle_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl Create<CircleInviteLink, CreateInviteLinkDTO> for InviteLinkRepository {
    #[instrument(skip(self, data), fields(circle_id = %data.circle_id, max_uses = data.max_uses))]
    async fn create(&self, data: &CreateInviteLinkDTO) -> Result<CircleInviteLink, Error> {
        debug!("Creating invite link");
        let link = CircleInviteLink {
            id: Uuid::new_v4().to_string(),
            circle_id: data.circle_id.clone(),
            code: data.code.clone(),
            max_uses: data.max_uses,
            used_count: 0,
            expires_at: data.expires_at,
            created_at: Utc::now(),
            creator_id: data.creator_id.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO circle_invite_links (id, circle_id, code, max_uses, used_count, expires_at, created_at, creator_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.id)
        .bind(&link.circle_id)
        .bind(&link.code)
        .bind(link.max_uses)
        .bind(link.used_count)
        .bind(link.expires_at)
        .bind(link.created_at)
        .bind(&link.creator_id)
        .execute(&self.connection_pool)
        .await?;

        info!("Invite link created with id {}", link.id);
        Ok(link)
    }
}
