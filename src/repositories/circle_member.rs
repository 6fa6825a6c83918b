//! CircleMemberRepository - Repository per le membership dei circle

use super::{Create, Delete, Read};
use crate::dtos::CreateCircleMemberDTO;
use crate::entities::{CircleMember, MemberStatus};
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Membership con nome e immagine dell'utente
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberWithUser {
    #[sqlx(flatten)]
    pub member: CircleMember,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

// CIRCLE MEMBER REPOSITORY
pub struct CircleMemberRepository {
    connection_pool: SqlitePool,
}

impl CircleMemberRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Membri di un circle con un certo stato, in ordine di ingresso
    #[instrument(skip(self))]
    pub async fn list_with_users(
        &self,
        circle_id: &str,
        status: MemberStatus,
    ) -> Result<Vec<MemberWithUser>, Error> {
        debug!("Listing circle members");
        sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT m.*, u.name AS user_name, u.image AS user_image
            FROM circle_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.circle_id = ? AND m.status = ?
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(circle_id)
        .bind(status)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Aggiorna lo stato di una membership; ritorna il numero di righe modificate
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        circle_id: &str,
        user_id: &str,
        status: MemberStatus,
    ) -> Result<u64, Error> {
        debug!("Updating member status");
        let result =
            sqlx::query("UPDATE circle_members SET status = ? WHERE circle_id = ? AND user_id = ?")
                .bind(status)
                .bind(circle_id)
                .bind(user_id)
                .execute(&self.connection_pool)
                .await?;

        Ok(result.rows_affected())
    }
}

impl Create<CircleMember, CreateCircleMemberDTO> for CircleMemberRepository {
    /// Inserisce la membership. La coppia (circle_id, user_id) è unica:
    /// un duplicato produce un errore di unique violation che il chiamante deve gestire.
    #[instrument(skip(self, data), fields(circle_id = %data.circle_id, user_id = %data.user_id))]
    async fn create(&self, data: &CreateCircleMemberDTO) -> Result<CircleMember, Error> {
        debug!("Creating circle membership");
        let member = CircleMember {
            id: Uuid::new_v4().to_string(),
            circle_id: data.circle_id.clone(),
            user_id: data.user_id.clone(),
            role: data.role,
            status: data.status,
            joined_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO circle_members (id, circle_id, user_id, role, status, joined_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&member.id)
        .bind(&member.circle_id)
        .bind(&member.user_id)
        .bind(member.role)
        .bind(member.status)
        .bind(member.joined_at)
        .execute(&self.connection_pool)
        .await?;

        info!("Membership created with status {:?}", member.status);
        Ok(member)
    }
}

/// Chiave: (circle_id, user_id)
impl Read<CircleMember, (String, String)> for CircleMemberRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &(String, String)) -> Result<Option<CircleMember>, Error> {
        debug!("Reading membership");
        sqlx::query_as::<_, CircleMember>(
            "SELECT * FROM circle_members WHERE circle_id = ? AND user_id = ?",
        )
        .bind(&id.0)
        .bind(&id.1)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

/// Chiave: (circle_id, user_id)
impl Delete<(String, String)> for CircleMemberRepository {
    #[instrument(skip(self))]
    async fn delete(&self, id: &(String, String)) -> Result<u64, Error> {
        debug!("Removing membership");
        let result = sqlx::query("DELETE FROM circle_members WHERE circle_id = ? AND user_id = ?")
            .bind(&id.0)
            .bind(&id.1)
            .execute(&self.connection_pool)
            .await?;

        info!("Membership removed ({} rows)", result.rows_affected());
        Ok(result.rows_affected())
    }
}
