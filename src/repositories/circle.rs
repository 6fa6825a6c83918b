//! CircleRepository - Repository per la gestione dei circle

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateCircleDTO, UpdateCircleSettingsDTO};
use crate::entities::{Circle, MemberRole, MemberStatus};
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Circle con i dati del proprietario e il numero di membri attivi
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CircleOverview {
    #[sqlx(flatten)]
    pub circle: Circle,
    pub owner_name: Option<String>,
    pub owner_image: Option<String>,
    pub member_count: i64,
}

const OVERVIEW_SELECT: &str = r#"
    SELECT
        c.*,
        u.name AS owner_name,
        u.image AS owner_image,
        (SELECT COUNT(*) FROM circle_members am
            WHERE am.circle_id = c.id AND am.status = 'ACTIVE') AS member_count
    FROM circles c
    JOIN users u ON u.id = c.owner_id
"#;

// CIRCLE REPOSITORY
pub struct CircleRepository {
    connection_pool: SqlitePool,
}

impl CircleRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_invite_code(&self, code: &str) -> Result<Option<Circle>, Error> {
        debug!("Finding circle by invite code");
        sqlx::query_as::<_, Circle>("SELECT * FROM circles WHERE invite_code = ?")
            .bind(code)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Circle in cui l'utente è membro ACTIVE, più recenti prima
    #[instrument(skip(self))]
    pub async fn list_active_for_user(&self, user_id: &str) -> Result<Vec<CircleOverview>, Error> {
        debug!("Listing circles for user");
        let query = format!(
            r#"{OVERVIEW_SELECT}
            JOIN circle_members m ON m.circle_id = c.id
            WHERE m.user_id = ? AND m.status = 'ACTIVE'
            ORDER BY c.created_at DESC"#
        );
        let circles = sqlx::query_as::<_, CircleOverview>(&query)
            .bind(user_id)
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Found {} circles", circles.len());
        Ok(circles)
    }

    #[instrument(skip(self))]
    pub async fn find_overview(&self, circle_id: &str) -> Result<Option<CircleOverview>, Error> {
        let query = format!("{OVERVIEW_SELECT} WHERE c.id = ?");
        sqlx::query_as::<_, CircleOverview>(&query)
            .bind(circle_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    #[instrument(skip(self, new_code))]
    pub async fn update_invite_code(&self, circle_id: &str, new_code: &str) -> Result<Circle, Error> {
        debug!("Rotating circle invite code");
        let circle = sqlx::query_as::<_, Circle>(
            "UPDATE circles SET invite_code = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(new_code)
        .bind(Utc::now())
        .bind(circle_id)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Invite code rotated");
        Ok(circle)
    }
}

impl Create<Circle, CreateCircleDTO> for CircleRepository {
    /// Crea il circle e la membership OWNER/ACTIVE del proprietario in un'unica transazione
    #[instrument(skip(self, data), fields(owner_id = %data.owner_id))]
    async fn create(&self, data: &CreateCircleDTO) -> Result<Circle, Error> {
        debug!("Creating new circle");
        let now = Utc::now();
        let circle = Circle {
            id: Uuid::new_v4().to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            invite_code: data.invite_code.clone(),
            is_invite_link_enabled: true,
            owner_id: data.owner_id.clone(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.connection_pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO circles (id, name, description, invite_code, is_invite_link_enabled, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&circle.id)
        .bind(&circle.name)
        .bind(&circle.description)
        .bind(&circle.invite_code)
        .bind(circle.is_invite_link_enabled)
        .bind(&circle.owner_id)
        .bind(circle.created_at)
        .bind(circle.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO circle_members (id, circle_id, user_id, role, status, joined_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&circle.id)
        .bind(&circle.owner_id)
        .bind(MemberRole::Owner)
        .bind(MemberStatus::Active)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Circle created with id {}", circle.id);
        Ok(circle)
    }
}

impl Read<Circle, String> for CircleRepository {
    #[instrument(skip(self), fields(circle_id = %id))]
    async fn read(&self, id: &String) -> Result<Option<Circle>, Error> {
        debug!("Reading circle by id");
        let circle = sqlx::query_as::<_, Circle>("SELECT * FROM circles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if circle.is_none() {
            debug!("Circle not found");
        }

        Ok(circle)
    }
}

impl Update<Circle, UpdateCircleSettingsDTO, String> for CircleRepository {
    #[instrument(skip(self, data), fields(circle_id = %id))]
    async fn update(&self, id: &String, data: &UpdateCircleSettingsDTO) -> Result<Circle, Error> {
        debug!("Updating circle settings");
        let circle = sqlx::query_as::<_, Circle>(
            r#"
            UPDATE circles SET
                is_invite_link_enabled = COALESCE(?, is_invite_link_enabled),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(data.is_invite_link_enabled)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("Circle settings updated");
        Ok(circle)
    }
}

impl Delete<String> for CircleRepository {
    /// Le membership, i link e gli inviti vengono rimossi in cascata dallo schema
    #[instrument(skip(self), fields(circle_id = %id))]
    async fn delete(&self, id: &String) -> Result<u64, Error> {
        debug!("Deleting circle");
        let result = sqlx::query("DELETE FROM circles WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Circle deleted ({} rows)", result.rows_affected());
        Ok(result.rows_affected())
    }
}
