#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use axum_test::http::HeaderName;
use bytes::Bytes;
use invito::core::{AppState, db};
use invito::dtos::UpsertUserDTO;
use invito::storage::MediaStore;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Store finto: non scrive nulla e restituisce un URL deterministico
pub struct FakeMediaStore;

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn save(
        &self,
        invite_id: &str,
        _uploader_id: &str,
        _body: Bytes,
        original_filename: &str,
    ) -> anyhow::Result<String> {
        Ok(format!("https://fake.local/{}/{}", invite_id, original_filename))
    }
}

/// Pool SQLite in memoria già migrato
pub async fn create_test_pool() -> SqlitePool {
    db::connect_in_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Crea un AppState per i test su un database SQLite in memoria già migrato
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test e lo store finto
pub async fn create_test_state() -> Arc<AppState> {
    create_test_state_with_pool(create_test_pool().await)
}

/// AppState sopra un pool fornito dal test (per manipolare lo schema prima delle richieste)
pub fn create_test_state_with_pool(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(
        pool,
        JWT_SECRET.to_string(),
        Arc::new(FakeMediaStore),
    ))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = invito::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Server di test con gli utenti indicati già sincronizzati
pub async fn setup_with_users(user_ids: &[&str]) -> (TestServer, Arc<AppState>) {
    let state = create_test_state().await;
    for user_id in user_ids {
        seed_user(&state, user_id).await;
    }
    (create_test_server(state.clone()), state)
}

pub async fn seed_user(state: &AppState, user_id: &str) {
    state
        .user
        .upsert_by_email(&UpsertUserDTO {
            id: user_id.to_string(),
            name: Some(format!("Name of {}", user_id)),
            email: format!("{}@example.com", user_id),
            image: None,
            email_verified: None,
        })
        .await
        .expect("Failed to seed user");
}

/// Genera un JWT token (HS256, valido 24 ore) per l'utente indicato
pub fn create_test_jwt(user_id: &str) -> String {
    invito::core::encode_jwt(user_id, JWT_SECRET).expect("Failed to create JWT token")
}

pub fn auth_header() -> HeaderName {
    HeaderName::from_static("authorization")
}

pub fn bearer(user_id: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id))
}

/// Crea un circle come `owner` e ne restituisce il JSON
pub async fn create_circle(server: &TestServer, owner: &str, name: &str) -> Value {
    let response = server
        .post("/api/circles")
        .add_header(auth_header(), bearer(owner))
        .json(&serde_json::json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Crea un link di invito e ne restituisce il JSON
pub async fn create_invite_link(
    server: &TestServer,
    owner: &str,
    circle_id: &str,
    max_uses: i64,
) -> Value {
    let response = server
        .post(&format!("/api/circles/{}/invites", circle_id))
        .add_header(auth_header(), bearer(owner))
        .json(&serde_json::json!({ "maxUses": max_uses }))
        .await;
    response.assert_status_ok();
    response.json()
}

pub async fn join(server: &TestServer, user: &str, code: &str) -> axum_test::TestResponse {
    server
        .post(&format!("/api/circles/join/{}", code))
        .add_header(auth_header(), bearer(user))
        .await
}

/// Crea un invito (evento) e ne restituisce il JSON
pub async fn create_invite(
    server: &TestServer,
    sender: &str,
    title: &str,
    event_date: &str,
    circle_id: Option<&str>,
) -> Value {
    let response = server
        .post("/api/invites")
        .add_header(auth_header(), bearer(sender))
        .json(&serde_json::json!({
            "title": title,
            "eventDate": event_date,
            "circleId": circle_id,
        }))
        .await;
    response.assert_status_ok();
    response.json()
}
