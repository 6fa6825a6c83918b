//! Integration tests per gli endpoints dei circle

mod common;

#[cfg(test)]
mod circle_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};

    // ============================================================
    // POST /api/circles - create_circle
    // ============================================================

    #[tokio::test]
    async fn test_create_circle_makes_caller_active_owner() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        let circle = create_circle(&server, "user-a", "Book Club").await;
        let circle_id = circle["id"].as_str().unwrap();
        assert_eq!(circle["name"], "Book Club");
        assert_eq!(circle["ownerId"], "user-a");
        assert_eq!(circle["isInviteLinkEnabled"], true);

        let code = circle["inviteCode"].as_str().unwrap();
        assert_eq!(code.len(), 12);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

        let response = server
            .get(&format!("/api/circles/{}", circle_id))
            .add_header(auth_header(), bearer("user-a"))
            .await;
        response.assert_status_ok();
        let details: Value = response.json();

        assert_eq!(details["currentUserStatus"], "ACTIVE");
        let members = details["members"].as_array().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0]["userId"], "user-a");
        assert_eq!(members[0]["role"], "OWNER");
        assert_eq!(members[0]["status"], "ACTIVE");
        assert_eq!(details["owner"]["id"], "user-a");
    }

    #[tokio::test]
    async fn test_create_circle_with_blank_name() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        for body in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
            let response = server
                .post("/api/circles")
                .add_header(auth_header(), bearer("user-a"))
                .json(&body)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let error: Value = response.json();
            assert!(error.get("error").is_some(), "Error envelope expected");
        }
    }

    #[tokio::test]
    async fn test_create_circle_without_token() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        let response = server
            .post("/api/circles")
            .json(&json!({ "name": "Book Club" }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        let response = server
            .get("/api/circles")
            .add_header(auth_header(), "Bearer invalid_token_here")
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_dev_token_disabled_by_default() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        let response = server
            .get("/api/circles")
            .add_header(auth_header(), "Bearer dev-token")
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_session_cookie_authentication() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        create_circle(&server, "user-a", "Book Club").await;

        let response = server
            .get("/api/circles")
            .add_header(
                HeaderName::from_static("cookie"),
                format!("authjs.session-token={}", create_test_jwt("user-a")),
            )
            .await;

        response.assert_status_ok();
        let circles: Vec<Value> = response.json();
        assert_eq!(circles.len(), 1);
    }

    // ============================================================
    // GET /api/circles - list_circles
    // ============================================================

    #[tokio::test]
    async fn test_list_circles_only_active_memberships() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        create_circle(&server, "user-b", "Climbing").await;

        // user-b entra PENDING nel Book Club: non deve comparire nella lista
        join(&server, "user-b", circle["inviteCode"].as_str().unwrap())
            .await
            .assert_status_ok();

        let response = server
            .get("/api/circles")
            .add_header(auth_header(), bearer("user-b"))
            .await;
        response.assert_status_ok();
        let circles: Vec<Value> = response.json();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0]["circle"]["name"], "Climbing");
        assert_eq!(circles[0]["owner"]["id"], "user-b");
        assert_eq!(circles[0]["memberCount"], 1);
    }

    // ============================================================
    // GET /api/circles/{id} - get_circle
    // ============================================================

    #[tokio::test]
    async fn test_get_circle_without_membership() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;

        let response = server
            .get(&format!("/api/circles/{}", circle["id"].as_str().unwrap()))
            .add_header(auth_header(), bearer("user-b"))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_get_circle_hides_data_from_pending_members() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        let circle_id = circle["id"].as_str().unwrap();
        create_invite(&server, "user-a", "Dinner", "2030-05-01T19:00:00Z", Some(circle_id)).await;

        join(&server, "user-b", circle["inviteCode"].as_str().unwrap())
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/api/circles/{}", circle_id))
            .add_header(auth_header(), bearer("user-b"))
            .await;
        response.assert_status_ok();
        let details: Value = response.json();
        assert_eq!(details["currentUserStatus"], "PENDING");
        assert_eq!(details["members"].as_array().unwrap().len(), 0);
        assert_eq!(details["invites"].as_array().unwrap().len(), 0);

        // il proprietario vede l'invito con il conteggio RSVP
        let response = server
            .get(&format!("/api/circles/{}", circle_id))
            .add_header(auth_header(), bearer("user-a"))
            .await;
        let details: Value = response.json();
        let invites = details["invites"].as_array().unwrap();
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0]["title"], "Dinner");
        assert_eq!(invites[0]["rsvpCount"], 0);
    }

    // ============================================================
    // Authorization matrix sulle operazioni del proprietario
    // ============================================================

    #[tokio::test]
    async fn test_owner_only_operations_matrix() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        let circle_id = circle["id"].as_str().unwrap();

        let regenerate = format!("/api/circles/{}/regenerate", circle_id);
        let approve = format!("/api/circles/{}/members/user-b/approve", circle_id);
        let links = format!("/api/circles/{}/invites", circle_id);
        let pending = format!("/api/circles/{}/pending", circle_id);

        // non autenticato
        server.post(&regenerate).await.assert_status_unauthorized();
        server.post(&approve).await.assert_status_unauthorized();
        server.get(&links).await.assert_status_unauthorized();
        server.get(&pending).await.assert_status_unauthorized();
        server
            .delete(&format!("/api/circles/{}", circle_id))
            .await
            .assert_status_unauthorized();

        // utente non proprietario
        for request in [
            server.post(&regenerate),
            server.post(&approve),
            server.get(&links),
            server.get(&pending),
            server.delete(&format!("/api/circles/{}", circle_id)),
        ] {
            request
                .add_header(auth_header(), bearer("user-b"))
                .await
                .assert_status_forbidden();
        }

        // proprietario
        for request in [
            server.post(&regenerate),
            server.post(&approve),
            server.get(&links),
            server.get(&pending),
        ] {
            request
                .add_header(auth_header(), bearer("user-a"))
                .await
                .assert_status_ok();
        }
        server
            .delete(&format!("/api/circles/{}", circle_id))
            .add_header(auth_header(), bearer("user-a"))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_owner_operations_on_missing_circle() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        server
            .post("/api/circles/does-not-exist/regenerate")
            .add_header(auth_header(), bearer("user-a"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // ============================================================
    // POST /api/circles/{id}/regenerate
    // ============================================================

    #[tokio::test]
    async fn test_regenerate_invalidates_old_code() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        let old_code = circle["inviteCode"].as_str().unwrap().to_string();

        let response = server
            .post(&format!("/api/circles/{}/regenerate", circle["id"].as_str().unwrap()))
            .add_header(auth_header(), bearer("user-a"))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let new_code = body["inviteCode"].as_str().unwrap();
        assert_eq!(new_code.len(), 12);
        assert_ne!(new_code, old_code);

        join(&server, "user-b", &old_code)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        join(&server, "user-b", new_code).await.assert_status_ok();
    }

    // ============================================================
    // PATCH /api/circles/{id}/settings
    // ============================================================

    #[tokio::test]
    async fn test_update_settings_toggles_invite_link() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        let circle_id = circle["id"].as_str().unwrap();
        let settings = format!("/api/circles/{}/settings", circle_id);

        server
            .patch(&settings)
            .add_header(auth_header(), bearer("user-b"))
            .json(&json!({ "isInviteLinkEnabled": false }))
            .await
            .assert_status_forbidden();

        let response = server
            .patch(&settings)
            .add_header(auth_header(), bearer("user-a"))
            .json(&json!({ "isInviteLinkEnabled": false }))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["isInviteLinkEnabled"], false);

        // senza il campo la configurazione resta invariata
        let response = server
            .patch(&settings)
            .add_header(auth_header(), bearer("user-a"))
            .json(&json!({}))
            .await;
        let updated: Value = response.json();
        assert_eq!(updated["isInviteLinkEnabled"], false);
    }

    // ============================================================
    // DELETE /api/circles/{id}
    // ============================================================

    #[tokio::test]
    async fn test_delete_circle_cascades_to_invites() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;
        let circle_id = circle["id"].as_str().unwrap();
        let invite =
            create_invite(&server, "user-a", "Dinner", "2030-05-01T19:00:00Z", Some(circle_id)).await;

        server
            .delete(&format!("/api/circles/{}", circle_id))
            .add_header(auth_header(), bearer("user-a"))
            .await
            .assert_status_ok();

        server
            .get(&format!("/api/invites/{}", invite["id"].as_str().unwrap()))
            .add_header(auth_header(), bearer("user-a"))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let response = server
            .get("/api/circles")
            .add_header(auth_header(), bearer("user-a"))
            .await;
        let circles: Vec<Value> = response.json();
        assert!(circles.is_empty());
    }

    // ============================================================
    // GET /api/circles/invite/{code} - anteprima pubblica
    // ============================================================

    #[tokio::test]
    async fn test_circle_preview_is_public() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let circle = create_circle(&server, "user-a", "Book Club").await;

        let response = server
            .get(&format!(
                "/api/circles/invite/{}",
                circle["inviteCode"].as_str().unwrap()
            ))
            .await;
        response.assert_status_ok();
        let preview: Value = response.json();
        assert_eq!(preview["name"], "Book Club");
        assert_eq!(preview["memberCount"], 1);
        assert_eq!(preview["owner"]["name"], "Name of user-a");
        assert!(preview.get("inviteCode").is_none());

        server
            .get("/api/circles/invite/unknowncode1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_and_ping_are_public() {
        let (server, _state) = setup_with_users(&[]).await;

        let response = server.get("/").await;
        response.assert_status_ok();
        response.assert_text("Server is running!");

        let response = server.get("/ping").await;
        response.assert_status_ok();
        response.assert_text(".");
    }
}
