//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance (`DATABASE_URL`).
//! `REDIS_URL` is optional and moves the upload limiter to Redis.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::Duration;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start() -> Option<TestServer> {
    if !check_test_env() {
        return None;
    }
    Some(TestServer::start().await.expect("Failed to start server"))
}

async fn create_resource(server: &TestServer, token: &str) -> ResourceDetail {
    let response = server
        .post_form("/resources", token, resource_form(&unique_title()))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let Some(server) = start().await else { return };

    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let Some(server) = start().await else { return };

    let response = server.get_root("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let Some(server) = start().await else { return };
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", None, &request).await.unwrap();
    let body: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body.user.username, request.username);
    assert_eq!(body.user.role, "USER");
    assert!(!body.user.email_verified);
    assert!(body.message.starts_with("Registration successful"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let Some(server) = start().await else { return };
    let request = RegisterRequest::unique();

    server.post("/auth/register", None, &request).await.unwrap();

    let twin = RegisterRequest {
        username: format!("{}x", request.username),
        ..request.clone()
    };
    let response = server.post("/auth/register", None, &twin).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.message, "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_bad_username() {
    let Some(server) = start().await else { return };
    let request = RegisterRequest {
        username: "has spaces".to_string(),
        ..RegisterRequest::unique()
    };

    let response = server.post("/auth/register", None, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_requires_verified_email() {
    let Some(server) = start().await else { return };
    let (request, _) = server.register().await.unwrap();

    let response = server
        .post("/auth/login", None, &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.message, "Please verify your email before logging in");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let Some(server) = start().await else { return };
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/auth/login", None, &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_verify_email_then_login() {
    let Some(server) = start().await else { return };
    let (request, user_id) = server.register().await.unwrap();
    let token = server.issue_token(user_id, Duration::hours(1)).await.unwrap();

    let response = server
        .post("/auth/verify-email", None, &json!({ "token": token }))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(auth.user.email_verified);
    assert_eq!(auth.token_type, "Bearer");

    // Tokens are single use
    let response = server
        .post("/auth/verify-email", None, &json!({ "token": token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    server.login(&request).await.unwrap();
}

#[tokio::test]
async fn test_verify_email_expired_token() {
    let Some(server) = start().await else { return };
    let (_, user_id) = server.register().await.unwrap();
    let token = server.issue_token(user_id, Duration::hours(-1)).await.unwrap();

    let response = server
        .post("/auth/verify-email", None, &json!({ "token": token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::GONE).await.unwrap();
}

#[tokio::test]
async fn test_resend_verification_for_unknown_email() {
    let Some(server) = start().await else { return };

    let response = server
        .post(
            "/auth/resend-verification",
            None,
            &json!({ "email": "nobody-here@example.com" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["message"].as_str().unwrap().starts_with("If an account exists"));
}

#[tokio::test]
async fn test_session() {
    let Some(server) = start().await else { return };

    let response = server.get("/auth/session", None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "authenticated": false }));

    let (user_id, token) = server.verified_member().await.unwrap();
    let response = server.get("/auth/session", Some(&token)).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["id"], user_id.to_string());

    let response = server.get("/auth/session", Some("garbage")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["authenticated"], false);
}

// ============================================================================
// Resource Tests
// ============================================================================

#[tokio::test]
async fn test_create_resource_requires_auth() {
    let Some(server) = start().await else { return };

    let response = server
        .client
        .post(format!("{}/api/v1/resources", server.base_url()))
        .multipart(resource_form("Anonymous Upload"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_resource() {
    let Some(server) = start().await else { return };
    let (user_id, token) = server.verified_member().await.unwrap();

    let resource = create_resource(&server, &token).await;

    assert_eq!(resource.user_id, user_id.to_string());
    assert!(!resource.is_approved);
    assert!(resource.is_visible);
    assert_eq!(resource.current_version, "1.0.0");
    assert!(resource.can_edit && resource.can_delete);
    assert_eq!(resource.versions.len(), 1);

    let version = &resource.versions[0];
    assert_eq!(version.changelog, "Initial release");
    assert!(version.zip_url.starts_with("/downloads/"));
    assert_eq!(version.image_urls.len(), 2);
    assert!(version.image_urls.iter().all(|u| u.starts_with("/images/items/")));
    assert_eq!(version.file_size, "22 Bytes");
}

#[tokio::test]
async fn test_create_resource_missing_archive() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();

    let form = reqwest::multipart::Form::new()
        .text("title", unique_title())
        .text("description", "A description that is long enough")
        .text("plugin_type", "Essentials")
        .text("content", "config")
        .text("version", "1.0.0");

    let response = server.post_form("/resources", &token, form).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body.error.message.contains("Missing required fields"));
}

#[tokio::test]
async fn test_create_resource_rejects_spam_title() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();

    let response = server
        .post_form("/resources", &token, resource_form("Buy now cheap kits"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "CONTENT_REJECTED");
}

#[tokio::test]
async fn test_pending_resource_visibility() {
    let Some(server) = start().await else { return };
    let (_, owner_token) = server.verified_member().await.unwrap();
    let (_, other_token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &owner_token).await;
    let path = format!("/resources/{}", resource.id);

    let response = server.get(&path, None).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get(&path, Some(&other_token)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get(&path, Some(&owner_token)).await.unwrap();
    let detail: ResourceDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.id, resource.id);

    // Listed for the owner only
    let query = format!("/resources?search={}", resource.title.replace(' ', "+"));
    let response = server.get(&query, Some(&owner_token)).await.unwrap();
    let rows: Vec<ListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].version_count, 1);

    let response = server.get(&query, None).await.unwrap();
    let rows: Vec<ListItem> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_edit_resource() {
    let Some(server) = start().await else { return };
    let (_, owner_token) = server.verified_member().await.unwrap();
    let (_, other_token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &owner_token).await;
    let path = format!("/resources/{}", resource.id);

    let response = server
        .put(&path, &other_token, &json!({ "title": "Hijacked Title" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put(&path, &owner_token, &json!({ "content": "updated", "category": null }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["content"], "updated");
    assert_eq!(body["category"], Value::Null);
    assert_eq!(body["title"], resource.title.as_str());
}

#[tokio::test]
async fn test_soft_delete_is_terminal() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &token).await;
    let path = format!("/resources/{}", resource.id);

    let response = server.delete(&path, &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Resource deleted successfully");

    let response = server.delete(&path, &token).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get(&path, Some(&token)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_owner_visibility_toggle() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &token).await;
    let path = format!("/resources/{}/visibility", resource.id);

    let response = server.patch(&path, &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "is_visible": false, "message": "Resource is now hidden" }));

    let response = server.patch(&path, &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["is_visible"], true);
}

#[tokio::test]
async fn test_download_tracking_always_ok() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &token).await;

    let path = format!("/resources/{}/download", resource.id);
    let response = server.post(&path, None, &json!({})).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);

    let response = server
        .post("/resources/1/download", None, &json!({}))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to track download");

    let response = server
        .get(&format!("/resources/{}", resource.id), Some(&token))
        .await
        .unwrap();
    let detail: ResourceDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.download_count, 1);
}

#[tokio::test]
async fn test_invalid_resource_id() {
    let Some(server) = start().await else { return };

    let response = server.get("/resources/not-an-id", None).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Version Tests
// ============================================================================

#[tokio::test]
async fn test_add_version_and_retention() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &token).await;
    let path = format!("/resources/{}/versions", resource.id);

    for minor in 1..=10 {
        let label = format!("1.{minor}.0");
        let response = server
            .post_form(&path, &token, version_form(&label))
            .await
            .unwrap();
        let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(body["version"]["version"], label.as_str());
    }

    let response = server.get(&path, Some(&token)).await.unwrap();
    let history: Vec<VersionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].version, "1.10.0");
    assert!(history.iter().all(|v| v.version != "1.0.0"));

    let response = server
        .get(&format!("/resources/{}", resource.id), Some(&token))
        .await
        .unwrap();
    let detail: ResourceDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.current_version, "1.10.0");
}

#[tokio::test]
async fn test_add_version_requires_owner() {
    let Some(server) = start().await else { return };
    let (_, owner_token) = server.verified_member().await.unwrap();
    let (_, other_token) = server.verified_member().await.unwrap();
    let resource = create_resource(&server, &owner_token).await;

    let response = server
        .post_form(
            &format!("/resources/{}/versions", resource.id),
            &other_token,
            version_form("2.0.0"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let Some(server) = start().await else { return };
    let (_, token) = server.verified_member().await.unwrap();

    let response = server.get("/admin/resources", Some(&token)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get("/admin/users", Some(&token)).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_approval_makes_resource_public() {
    let Some(server) = start().await else { return };
    let (_, owner_token) = server.verified_member().await.unwrap();
    let (_, admin_token) = server.admin().await.unwrap();
    let resource = create_resource(&server, &owner_token).await;

    let response = server
        .get("/admin/resources?approved=false", Some(&admin_token))
        .await
        .unwrap();
    let rows: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let row = rows
        .iter()
        .find(|r| r["id"] == resource.id.as_str())
        .expect("pending resource listed for admins");
    assert_eq!(row["owner"]["email_verified"], true);

    let response = server
        .patch(&format!("/admin/resources/{}/approve", resource.id), &admin_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "is_approved": true, "message": "Resource approved" }));

    let response = server
        .get(&format!("/resources/{}", resource.id), None)
        .await
        .unwrap();
    let detail: ResourceDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!detail.can_edit);

    let response = server
        .patch(&format!("/admin/resources/{}/hide", resource.id), &admin_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Resource hidden");

    let response = server
        .get(&format!("/resources/{}", resource.id), None)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_delete_and_include_deleted() {
    let Some(server) = start().await else { return };
    let (_, owner_token) = server.verified_member().await.unwrap();
    let (_, admin_token) = server.admin().await.unwrap();
    let resource = create_resource(&server, &owner_token).await;

    let response = server
        .delete(&format!("/admin/resources/{}", resource.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let search = resource.title.replace(' ', "+");
    let response = server
        .get(&format!("/admin/resources?search={search}"), Some(&admin_token))
        .await
        .unwrap();
    let rows: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(rows.is_empty());

    let response = server
        .get(
            &format!("/admin/resources?search={search}&include_deleted=true"),
            Some(&admin_token),
        )
        .await
        .unwrap();
    let rows: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["deleted_at"].is_string());
}

#[tokio::test]
async fn test_ban_toggle() {
    let Some(server) = start().await else { return };
    let (member_id, member_token) = server.verified_member().await.unwrap();
    let (admin_id, admin_token) = server.admin().await.unwrap();

    let response = server
        .patch(&format!("/admin/users/{admin_id}/ban"), &admin_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.message, "Cannot ban yourself");

    let response = server
        .patch(&format!("/admin/users/{member_id}/ban"), &admin_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body, json!({ "is_banned": true, "message": "User banned" }));

    // A banned account keeps a valid token but can no longer upload
    let response = server
        .post_form("/resources", &member_token, resource_form(&unique_title()))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get("/admin/users", Some(&admin_token)).await.unwrap();
    let users: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let row = users
        .iter()
        .find(|u| u["id"] == member_id.to_string().as_str())
        .unwrap();
    assert_eq!(row["is_banned"], true);
    assert_eq!(row["resource_count"], 0);
}
