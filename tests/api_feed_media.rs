//! Integration tests per il feed degli eventi e l'upload dei media

mod common;

#[cfg(test)]
mod feed_media_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::{Value, json};

    const EVENT_DATE: &str = "2030-07-01T18:00:00Z";

    fn id_of(value: &Value) -> String {
        value["id"].as_str().unwrap().to_string()
    }

    // ============================================================
    // Feed
    // ============================================================

    #[tokio::test]
    async fn test_create_post_defaults_to_update() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;

        let response = server
            .post("/api/feed")
            .add_header(auth_header(), bearer("user-a"))
            .json(&json!({ "inviteId": id_of(&invite), "content": "  Bring a blanket  " }))
            .await;
        response.assert_status_ok();
        let post: Value = response.json();
        assert_eq!(post["type"], "UPDATE");
        assert_eq!(post["content"], "Bring a blanket");
        assert_eq!(post["userId"], "user-a");

        let response = server
            .post("/api/feed")
            .add_header(auth_header(), bearer("user-a"))
            .json(&json!({ "inviteId": id_of(&invite), "content": "hi!", "type": "CHAT" }))
            .await;
        response.assert_status_ok();
        let post: Value = response.json();
        assert_eq!(post["type"], "CHAT");
    }

    #[tokio::test]
    async fn test_create_post_validation() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;

        for content in ["", "    "] {
            server
                .post("/api/feed")
                .add_header(auth_header(), bearer("user-a"))
                .json(&json!({ "inviteId": id_of(&invite), "content": content }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        server
            .post("/api/feed")
            .add_header(auth_header(), bearer("user-a"))
            .json(&json!({ "inviteId": "missing-invite", "content": "hello" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_feed_newest_first() {
        let (server, _state) = setup_with_users(&["user-a", "user-b"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;
        let invite_id = id_of(&invite);

        for (user, content) in [("user-a", "one"), ("user-b", "two"), ("user-a", "three")] {
            server
                .post("/api/feed")
                .add_header(auth_header(), bearer(user))
                .json(&json!({ "inviteId": invite_id, "content": content }))
                .await
                .assert_status_ok();
        }

        let response = server
            .get(&format!("/api/feed/{}", invite_id))
            .add_header(auth_header(), bearer("user-b"))
            .await;
        response.assert_status_ok();
        let feed: Vec<Value> = response.json();
        let contents: Vec<&str> = feed.iter().map(|p| p["content"].as_str().unwrap()).collect();
        assert_eq!(contents, vec!["three", "two", "one"]);
        assert_eq!(feed[1]["user"]["name"], "Name of user-b");
    }

    #[tokio::test]
    async fn test_get_feed_requires_authentication() {
        let (server, _state) = setup_with_users(&["user-a"]).await;

        server
            .get("/api/feed/any-invite")
            .await
            .assert_status_unauthorized();
    }

    // ============================================================
    // Media
    // ============================================================

    #[tokio::test]
    async fn test_upload_media() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;
        let invite_id = id_of(&invite);

        let form = MultipartForm::new()
            .add_text("inviteId", invite_id.clone())
            .add_text("caption", "Sunset")
            .add_part(
                "file",
                Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
                    .file_name("sunset.png")
                    .mime_type("image/png"),
            );

        let response = server
            .post("/api/media")
            .add_header(auth_header(), bearer("user-a"))
            .multipart(form)
            .await;
        response.assert_status_ok();
        let media: Value = response.json();
        assert_eq!(media["type"], "IMAGE");
        assert_eq!(media["caption"], "Sunset");
        assert_eq!(
            media["url"],
            format!("https://fake.local/{}/sunset.png", invite_id)
        );

        let response = server
            .get(&format!("/api/invites/{}", invite_id))
            .add_header(auth_header(), bearer("user-a"))
            .await;
        let details: Value = response.json();
        assert_eq!(details["media"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_video_is_typed_as_video() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;

        let form = MultipartForm::new()
            .add_text("inviteId", id_of(&invite))
            .add_part(
                "file",
                Part::bytes(vec![0u8; 16])
                    .file_name("clip.mp4")
                    .mime_type("video/mp4"),
            );

        let response = server
            .post("/api/media")
            .add_header(auth_header(), bearer("user-a"))
            .multipart(form)
            .await;
        response.assert_status_ok();
        let media: Value = response.json();
        assert_eq!(media["type"], "VIDEO");
        assert!(media["caption"].is_null());
    }

    #[tokio::test]
    async fn test_upload_media_validation() {
        let (server, _state) = setup_with_users(&["user-a"]).await;
        let invite = create_invite(&server, "user-a", "Picnic", EVENT_DATE, None).await;

        // senza file
        let form = MultipartForm::new().add_text("inviteId", id_of(&invite));
        server
            .post("/api/media")
            .add_header(auth_header(), bearer("user-a"))
            .multipart(form)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        // senza inviteId
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![1, 2, 3]).file_name("a.png").mime_type("image/png"),
        );
        server
            .post("/api/media")
            .add_header(auth_header(), bearer("user-a"))
            .multipart(form)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        // invito inesistente
        let form = MultipartForm::new()
            .add_text("inviteId", "missing-invite")
            .add_part(
                "file",
                Part::bytes(vec![1, 2, 3]).file_name("a.png").mime_type("image/png"),
            );
        server
            .post("/api/media")
            .add_header(auth_header(), bearer("user-a"))
            .multipart(form)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
