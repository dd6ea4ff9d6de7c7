//! API Integration Tests
//!
//! Each test spawns the server on the in-process store; no external services
//! are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer, TestUser,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_post(server: &TestServer, user: &TestUser, title: &str) -> Post {
    let response = server
        .post_auth("/api/v1/posts", &user.token, &CreatePostRequest::titled(&user.id, title))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn toggle_like(server: &TestServer, user: &TestUser, post_id: &str) -> LikeState {
    let response = server
        .post_empty_auth(&format!("/api/v1/posts/{post_id}/like"), &user.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn notifications(server: &TestServer, user: &TestUser) -> NotificationList {
    let response = server.get_auth("/api/v1/notifications", &user.token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Identity Webhook & Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_user_created_webhook_syncs_user() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let response = server.get_auth("/api/v1/users/@me", &ada.token).await.unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.name, "Ada Lovelace");
    assert_eq!(me.email, format!("{}@example.com", ada.external_id));
    assert!(me.avatar_url.ends_with(".png"));
    assert!(!me.is_online);
}

#[tokio::test]
async fn test_webhook_updates_profile_and_presence() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let response = server
        .send_webhook(
            "user.updated",
            json!({ "id": ada.external_id, "first_name": "Augusta", "last_name": "King" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .send_webhook("session.created", json!({ "user_id": ada.external_id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let me: CurrentUser = assert_json(
        server.get_auth("/api/v1/users/@me", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(me.name, "Augusta King");
    assert!(me.is_online);

    let response = server
        .send_webhook("session.ended", json!({ "user_id": ada.external_id }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let me: CurrentUser = assert_json(
        server.get_auth("/api/v1/users/@me", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(!me.is_online);
}

#[tokio::test]
async fn test_webhook_failures_are_bad_request() {
    let server = TestServer::start().await.unwrap();

    // unsigned
    let response = server
        .client
        .post(format!("{}/webhooks/identity", server.base_url()))
        .body(r#"{"type":"user.created","data":{"id":"user_x"}}"#)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // wrong signature
    let response = server
        .client
        .post(format!("{}/webhooks/identity", server.base_url()))
        .header("svix-id", "msg_forged")
        .header("svix-timestamp", chrono::Utc::now().timestamp().to_string())
        .header("svix-signature", "v1,Zm9yZ2VkIHNpZ25hdHVyZQ==")
        .body(r#"{"type":"user.created","data":{"id":"user_x"}}"#)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // signed, but the user was never created
    let response = server
        .send_webhook("user.updated", json!({ "id": "user_never_created" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // unknown event types are acknowledged
    let response = server
        .send_webhook("organization.created", json!({ "id": "org_1" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_authentication_failures() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/v1/users/@me", "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // valid token for an identity that was never synced
    let token = server.token_for("user_unsynced").unwrap();
    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNKNOWN_IDENTITY");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_list_and_get_users() {
    let server = TestServer::start().await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let users: Vec<UserSummary> = assert_json(
        server.get_auth("/api/v1/users", &bob.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Ada Lovelace", "Bob Builder"]);

    let user: UserSummary = assert_json(
        server
            .get_auth(&format!("/api/v1/users/{}", ada.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(user.id, ada.id);

    let response = server.get_auth("/api/v1/users/999", &bob.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/v1/users/not-an-id", &bob.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_delete_post() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();

    let post = create_post(&server, &ada, "Sunset").await;
    assert_eq!(post.creator_id, ada.id);
    assert_eq!(post.title, "Sunset");
    assert!(post.media_url.is_none());

    let posts: Vec<Post> = assert_json(
        server
            .get_auth(&format!("/api/v1/users/{}/posts", ada.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(posts.len(), 1);

    // only the creator may delete
    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &bob.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_POST_CREATOR");

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_validation() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();

    // posting as someone else
    let response = server
        .post_auth("/api/v1/posts", &ada.token, &CreatePostRequest::titled(&bob.id, "Not mine"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INVALID_SENDER");

    let response = server
        .post_auth("/api/v1/posts", &ada.token, &CreatePostRequest::titled(&ada.id, ""))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth("/api/v1/posts", &ada.token, &json!({ "title": "No creator" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_feed_puts_followed_creators_first() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let cy = server.sign_up("Cy", "Young").await.unwrap();

    let from_bob = create_post(&server, &bob, "Bob's bridge").await;
    let from_cy = create_post(&server, &cy, "Cy's curveball").await;

    let response = server
        .put_auth(&format!("/api/v1/users/{}/follow", bob.id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let feed: Vec<Post> = assert_json(
        server.get_auth("/api/v1/posts", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let ids: Vec<_> = feed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, [from_bob.id.as_str(), from_cy.id.as_str()]);
}

// ============================================================================
// Media Tests
// ============================================================================

#[tokio::test]
async fn test_upload_media_and_attach_to_post() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let issued: UploadUrl = assert_json(
        server
            .post_empty_auth("/api/v1/posts/upload-url", &ada.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(issued.upload_url.starts_with(&server.base_url()));

    let image = vec![0x89, b'P', b'N', b'G', 1, 2, 3];
    let uploaded: MediaUpload = assert_json(
        server
            .put_bytes_auth(&issued.upload_url, &ada.token, "image/png", image.clone())
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    // an issued location takes one upload
    let response = server
        .put_bytes_auth(&issued.upload_url, &ada.token, "image/png", image.clone())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut request = CreatePostRequest::titled(&ada.id, "With a picture");
    request.media_ref = Some(uploaded.storage_id.clone());
    let post: Post = assert_json(
        server.post_auth("/api/v1/posts", &ada.token, &request).await.unwrap(),
        StatusCode::CREATED,
    )
    .await
    .unwrap();
    assert_eq!(post.media_ref.as_deref(), Some(uploaded.storage_id.as_str()));

    let feed: Vec<Post> = assert_json(
        server.get_auth("/api/v1/posts", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let media_url = feed[0].media_url.clone().expect("media resolved");

    let response = server.get(&media_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(response.bytes().await.unwrap().to_vec(), image);
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_toggle_pairs_with_notification() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let post = create_post(&server, &ada, "Sunset").await;

    let state = toggle_like(&server, &bob, &post.id).await;
    assert_eq!(state, LikeState { liked: true, like_count: 1 });

    let list = notifications(&server, &ada).await;
    assert_eq!(list.count, 1);
    assert_eq!(list.unread, 1);
    let like = &list.notifications[0];
    assert_eq!(like.kind, "like");
    assert_eq!(like.actor_id.as_deref(), Some(bob.id.as_str()));
    assert_eq!(like.actor_name, "Bob Builder");
    assert_eq!(like.post_title.as_deref(), Some("Sunset"));

    let state = toggle_like(&server, &bob, &post.id).await;
    assert_eq!(state, LikeState { liked: false, like_count: 0 });
    assert_eq!(notifications(&server, &ada).await.count, 0);

    let read: LikeState = assert_json(
        server
            .get_auth(&format!("/api/v1/posts/{}/likes", post.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(read, LikeState { liked: false, like_count: 0 });
}

#[tokio::test]
async fn test_like_unknown_post_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/posts/424242/like", &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_deleting_post_cascades_likes() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let post = create_post(&server, &ada, "Short-lived").await;

    toggle_like(&server, &bob, &post.id).await;
    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let read: LikeState = assert_json(
        server
            .get_auth(&format!("/api/v1/posts/{}/likes", post.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(read.like_count, 0);

    // the like notification outlives the post, without a title
    let list = notifications(&server, &ada).await;
    assert_eq!(list.count, 1);
    assert!(list.notifications[0].post_title.is_none());
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let post = create_post(&server, &ada, "Sunset").await;
    let path = format!("/api/v1/posts/{}/comments", post.id);

    for content in ["Lovely", "Where was this?"] {
        let request = CreateCommentRequest {
            sender_id: bob.id.clone(),
            content: content.to_string(),
        };
        let comment: Comment = assert_json(
            server.post_auth(&path, &bob.token, &request).await.unwrap(),
            StatusCode::CREATED,
        )
        .await
        .unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.sender_name, "Bob Builder");
    }

    let comments: Vec<Comment> = assert_json(
        server.get_auth(&path, &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let contents: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, ["Lovely", "Where was this?"]);

    let list = notifications(&server, &ada).await;
    assert_eq!(list.count, 2);
    assert!(list.notifications.iter().all(|n| n.kind == "comment"));

    let first = &comments[0];
    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", first.id), &ada.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_SENDER");

    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", first.id), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let comments: Vec<Comment> = assert_json(
        server.get_auth(&path, &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(comments.len(), 1);
    // deleting a comment keeps its notification
    assert_eq!(notifications(&server, &ada).await.count, 2);
}

#[tokio::test]
async fn test_comment_as_someone_else_rejected() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let post = create_post(&server, &ada, "Sunset").await;

    let request = CreateCommentRequest {
        sender_id: ada.id.clone(),
        content: "Forged".to_string(),
    };
    let response = server
        .post_auth(&format!("/api/v1/posts/{}/comments", post.id), &bob.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let path = format!("/api/v1/users/{}/follow", bob.id);

    let response = server.put_auth(&path, &ada.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.put_auth(&path, &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_FOLLOWING");

    let status: FollowStatus = assert_json(
        server.get_auth(&path, &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(status.following);

    let followers: Vec<UserSummary> = assert_json(
        server
            .get_auth(&format!("/api/v1/users/{}/followers", bob.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].id, ada.id);

    let following: Vec<UserSummary> = assert_json(
        server
            .get_auth(&format!("/api/v1/users/{}/following", ada.id), &bob.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(following[0].id, bob.id);

    let response = server.delete_auth(&path, &ada.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_FOLLOWING");

    // follow then unfollow each notify the followed user
    let kinds: Vec<String> = notifications(&server, &bob)
        .await
        .notifications
        .into_iter()
        .map(|n| n.kind)
        .collect();
    assert_eq!(kinds, ["unfollow", "follow"]);
}

#[tokio::test]
async fn test_self_follow_rejected() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();

    let response = server
        .put_auth(&format!("/api/v1/users/{}/follow", ada.id), &ada.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_FOLLOW_SELF");
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_mark_read_and_read_all() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let cy = server.sign_up("Cy", "Young").await.unwrap();
    let post = create_post(&server, &ada, "Sunset").await;

    toggle_like(&server, &bob, &post.id).await;
    toggle_like(&server, &cy, &post.id).await;
    server
        .put_auth(&format!("/api/v1/users/{}/follow", ada.id), &bob.token)
        .await
        .unwrap();

    let list = notifications(&server, &ada).await;
    assert_eq!((list.count, list.unread), (3, 3));
    let first = list.notifications[0].id.clone();

    // someone else's notification
    let response = server
        .post_empty_auth(&format!("/api/v1/notifications/{first}/read"), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    for _ in 0..2 {
        let response = server
            .post_empty_auth(&format!("/api/v1/notifications/{first}/read"), &ada.token)
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }
    assert_eq!(notifications(&server, &ada).await.unread, 2);

    let marked: MarkAllRead = assert_json(
        server
            .post_empty_auth("/api/v1/notifications/read-all", &ada.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(marked.updated, 2);

    let list = notifications(&server, &ada).await;
    assert_eq!((list.count, list.unread), (3, 0));
    assert!(list.notifications.iter().all(|n| n.is_read));

    let response = server
        .post_empty_auth("/api/v1/notifications/77777/read", &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Contest & Wall of Fame Tests
// ============================================================================

#[tokio::test]
async fn test_contest_archives_winner_and_purges_board() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let bob = server.sign_up("Bob", "Builder").await.unwrap();
    let cy = server.sign_up("Cy", "Young").await.unwrap();

    let wall: Option<WallOfFameEntry> = assert_json(
        server.get_auth("/api/v1/wall-of-fame", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(wall.is_none());

    let winner = create_post(&server, &ada, "Sunset").await;
    let runner_up = create_post(&server, &bob, "Bridge").await;
    toggle_like(&server, &bob, &winner.id).await;
    toggle_like(&server, &cy, &winner.id).await;
    toggle_like(&server, &cy, &runner_up.id).await;
    let comments_path = format!("/api/v1/posts/{}/comments", winner.id);
    let request = CreateCommentRequest {
        sender_id: bob.id.clone(),
        content: "Stunning".to_string(),
    };
    let response = server.post_auth(&comments_path, &bob.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    server
        .put_auth(&format!("/api/v1/users/{}/follow", ada.id), &cy.token)
        .await
        .unwrap();

    let run: ContestRun = assert_json(server.run_contest().await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(run.outcome, "winner");
    let entry = run.entry.expect("winner entry");
    assert_eq!(entry.post_id, winner.id);
    assert_eq!(entry.likes, 2);

    let wall: Option<WallOfFameEntry> = assert_json(
        server.get_auth("/api/v1/wall-of-fame", &bob.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let wall = wall.expect("archived entry");
    assert_eq!(wall.title, "Sunset");
    assert_eq!(wall.likes, 2);

    // the board is empty again
    let feed: Vec<Post> = assert_json(
        server.get_auth("/api/v1/posts", &cy.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(feed.is_empty());

    let comments: Vec<Comment> = assert_json(
        server.get_auth(&comments_path, &cy.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(comments.is_empty());

    // only the announcement to the winner survives
    let list = notifications(&server, &ada).await;
    assert_eq!(list.count, 1);
    assert_eq!(list.notifications[0].kind, "wallOfFame");
    assert_eq!(notifications(&server, &bob).await.count, 0);

    // follows are not part of the purge
    let status: FollowStatus = assert_json(
        server
            .get_auth(&format!("/api/v1/users/{}/follow", ada.id), &cy.token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(status.following);
}

#[tokio::test]
async fn test_contest_without_posts_changes_nothing() {
    let server = TestServer::start().await.unwrap();
    let ada = server.sign_up("Ada", "Lovelace").await.unwrap();
    let post = create_post(&server, &ada, "Only one").await;

    let run: ContestRun = assert_json(server.run_contest().await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(run.outcome, "winner");
    assert_eq!(run.entry.unwrap().post_id, post.id);

    let run: ContestRun = assert_json(server.run_contest().await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(run.outcome, "noWinner");
    assert!(run.entry.is_none());

    let wall: Option<WallOfFameEntry> = assert_json(
        server.get_auth("/api/v1/wall-of-fame", &ada.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(wall.unwrap().title, "Only one");
    assert_eq!(notifications(&server, &ada).await.count, 1);
}

#[tokio::test]
async fn test_contest_trigger_requires_key() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .client
        .post(format!("{}/internal/contest/run", server.base_url()))
        .header("x-scheduler-key", "wrong")
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INVALID_SCHEDULER_KEY");
}
