//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Password used by every fixture account
pub const PASSWORD: &str = "TestPass123!";

/// Get a unique suffix for test data
///
/// Mixes in the process id so reruns against the same database do not collide.
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{n}", std::process::id() % 100_000)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("t{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: PASSWORD.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// User as returned by the auth endpoints
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub email_verified: bool,
    pub is_banned: bool,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    pub id: String,
    pub version: String,
    pub changelog: String,
    pub zip_url: String,
    pub image_urls: Vec<String>,
    pub file_size: String,
}

/// Resource detail payload
#[derive(Debug, Deserialize)]
pub struct ResourceDetail {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub current_version: String,
    pub is_visible: bool,
    pub is_approved: bool,
    pub download_count: i64,
    pub author: String,
    pub versions: Vec<VersionResponse>,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub version_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Bytes of a small but well-formed zip container (empty archive)
pub fn archive_bytes() -> Vec<u8> {
    let mut bytes = vec![0x50, 0x4b, 0x05, 0x06];
    bytes.extend_from_slice(&[0; 18]);
    bytes
}

fn image_part(name: &str) -> Part {
    Part::bytes(vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a])
        .file_name(name.to_string())
}

/// Create-resource form with one archive and two images
pub fn resource_form(title: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .text("description", "Kits, warps and a starter economy for survival servers")
        .text("plugin_type", "Essentials")
        .text("category", "Economy")
        .text("content", "kits:\n  starter:\n    items: [stone_sword]")
        .text("version", "1.0.0")
        .part("archive", Part::bytes(archive_bytes()).file_name("pack.zip"))
        .part("images", image_part("cover.png"))
        .part("images", image_part("preview.webp"))
}

/// Add-version form
pub fn version_form(label: &str) -> Form {
    Form::new()
        .text("version", label.to_string())
        .text("changelog", format!("Release {label}"))
        .part("archive", Part::bytes(archive_bytes()).file_name("pack.zip"))
}

/// Distinct, filter-safe resource title
pub fn unique_title() -> String {
    let words = [
        "Harbor", "Lantern", "Quarry", "Meadow", "Falcon", "Ember", "Glacier", "Orchard",
    ];
    let n = COUNTER.fetch_add(1, Ordering::SeqCst) as usize;
    format!(
        "{} {} Toolkit {}",
        words[n % words.len()],
        words[(n / words.len() + 3) % words.len()],
        unique_suffix()
    )
}
