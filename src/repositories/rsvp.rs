//! RsvpRepository - Repository per le risposte agli inviti

use crate::dtos::UpsertRsvpDTO;
use crate::entities::Rsvp;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RsvpWithUser {
    #[sqlx(flatten)]
    pub rsvp: Rsvp,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
}

// RSVP REPOSITORY
pub struct RsvpRepository {
    connection_pool: SqlitePool,
}

impl RsvpRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Crea o sostituisce la risposta dell'utente. La coppia (invite_id, user_id) è unica:
    /// in caso di conflitto vengono riscritti tutti i campi e `updated_at`.
    #[instrument(skip(self, data), fields(invite_id = %data.invite_id, user_id = %data.user_id))]
    pub async fn upsert(&self, data: &UpsertRsvpDTO) -> Result<Rsvp, Error> {
        debug!("Upserting RSVP");
        let now = Utc::now();
        let rsvp = sqlx::query_as::<_, Rsvp>(
            r#"
            INSERT INTO rsvps (id, invite_id, user_id, status, guest_count, dietary, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (invite_id, user_id) DO UPDATE SET
                status = excluded.status,
                guest_count = excluded.guest_count,
                dietary = excluded.dietary,
                note = excluded.note,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&data.invite_id)
        .bind(&data.user_id)
        .bind(data.status)
        .bind(data.guest_count)
        .bind(&data.dietary)
        .bind(&data.note)
        .bind(now)
        .bind(now)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("RSVP stored with status {:?}", rsvp.status);
        Ok(rsvp)
    }

    #[instrument(skip(self))]
    pub async fn list_with_users(&self, invite_id: &str) -> Result<Vec<RsvpWithUser>, Error> {
        debug!("Listing RSVPs of invite");
        sqlx::query_as::<_, RsvpWithUser>(
            r#"
            SELECT r.*, u.name AS user_name, u.image AS user_image
            FROM rsvps r
            JOIN users u ON u.id = r.user_id
            WHERE r.invite_id = ?
            ORDER BY r.updated_at DESC
            "#,
        )
        .bind(invite_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}
