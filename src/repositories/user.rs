//! UserRepository - Repository per la gestione degli utenti

use super::{Read, Update};
use crate::dtos::{UpdateProfileDTO, UpsertUserDTO, UserStatsDTO};
use crate::entities::{ProfileVisibility, User};
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

// USER REPOSITORY
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Inserisce o aggiorna un utente usando l'email come chiave.
    /// Se l'email esiste già, anche l'id viene riallineato a quello dell'identity provider
    /// (le foreign key verso `users` sono `ON UPDATE CASCADE`).
    #[instrument(skip(self, data), fields(user_id = %data.id))]
    pub async fn upsert_by_email(&self, data: &UpsertUserDTO) -> Result<User, Error> {
        debug!("Upserting user by email");
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, email_verified, image, profile_visibility, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (email) DO UPDATE SET
                id = excluded.id,
                name = excluded.name,
                image = excluded.image,
                email_verified = excluded.email_verified
            RETURNING *
            "#,
        )
        .bind(&data.id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.email_verified)
        .bind(&data.image)
        .bind(ProfileVisibility::Public)
        .bind(Utc::now())
        .fetch_one(&self.connection_pool)
        .await?;

        info!("User synchronized");
        Ok(user)
    }

    /// Calcola le statistiche di attività di un utente
    #[instrument(skip(self))]
    pub async fn get_stats(&self, user_id: &str) -> Result<UserStatsDTO, Error> {
        debug!("Computing user stats");
        let circles_owned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM circles WHERE owner_id = ?")
                .bind(user_id)
                .fetch_one(&self.connection_pool)
                .await?;

        let circles_joined: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT m.circle_id)
            FROM circle_members m
            JOIN circles c ON c.id = m.circle_id
            WHERE m.user_id = ? AND c.owner_id != ? AND m.status = 'ACTIVE'
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await?;

        let events_created: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invites WHERE sender_id = ?")
                .bind(user_id)
                .fetch_one(&self.connection_pool)
                .await?;

        let (events_attended, total_responses): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(CASE WHEN status = 'YES' THEN 1 END),
                COUNT(*)
            FROM rsvps WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await?;

        // Inviti "ricevuti": non inviati dall'utente, pubblici o di un circle di cui è membro
        let visible_invites: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT i.id)
            FROM invites i
            LEFT JOIN circle_members m ON m.circle_id = i.circle_id AND m.user_id = ?
            WHERE i.sender_id != ? AND (i.circle_id IS NULL OR m.id IS NOT NULL)
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await?;

        let posts_shared: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM event_feed_items WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.connection_pool)
                .await?;

        let rsvp_response_rate = if visible_invites > 0 {
            total_responses as f64 / visible_invites as f64 * 100.0
        } else {
            0.0
        };

        Ok(UserStatsDTO {
            circles_owned,
            circles_joined,
            events_created,
            events_attended,
            rsvp_response_rate,
            posts_shared,
        })
    }
}

impl Read<User, String> for UserRepository {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn read(&self, id: &String) -> Result<Option<User>, Error> {
        debug!("Reading user by id");
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if user.is_none() {
            debug!("User not found");
        }

        Ok(user)
    }
}

impl Update<User, UpdateProfileDTO, String> for UserRepository {
    #[instrument(skip(self, data), fields(user_id = %id))]
    async fn update(&self, id: &String, data: &UpdateProfileDTO) -> Result<User, Error> {
        debug!("Updating user profile");
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                bio = COALESCE(?, bio),
                profile_visibility = COALESCE(?, profile_visibility)
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.bio)
        .bind(data.profile_visibility)
        .bind(id)
        .fetch_one(&self.connection_pool)
        .await?;

        info!("User profile updated");
        Ok(user)
    }
}
