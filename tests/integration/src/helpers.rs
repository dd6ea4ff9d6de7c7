//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, signing identity webhooks,
//! minting session tokens and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use social_api::{create_app, create_app_state};
use social_common::{AppConfig, JwtService, WebhookVerifier};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_suffix, CurrentUser};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "https://auth.integration.test";
pub const APP_DOMAIN: &str = "auth.integration.test";
/// base64("integration-webhook-key")
pub const WEBHOOK_SECRET: &str = "whsec_aW50ZWdyYXRpb24td2ViaG9vay1rZXk=";
pub const SCHEDULER_KEY: &str = "integration-scheduler-key";

/// A user synced through the webhook, with a valid session token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub external_id: String,
    pub name: String,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    webhooks: WebhookVerifier,
    _upload_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let upload_dir = tempfile::tempdir()?;
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let config = test_config(&upload_dir, addr)?;
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt: JwtService::new(JWT_SECRET, ISSUER, 0),
            webhooks: WebhookVerifier::new(WEBHOOK_SECRET, 300)?,
            _upload_dir: upload_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url(), path)
        }
    }

    /// Session token for an external id, as the identity provider would issue it
    pub fn token_for(&self, external_id: &str) -> Result<String> {
        Ok(self.jwt.issue(external_id, 3600)?)
    }

    /// Deliver a correctly signed webhook event
    pub async fn send_webhook(&self, event_type: &str, data: Value) -> Result<Response> {
        let body = serde_json::to_vec(&json!({ "type": event_type, "data": data }))?;
        let id = format!("msg_{}", unique_suffix());
        let timestamp = Utc::now().timestamp();
        let signature = self.webhooks.sign(&id, timestamp, &body);

        Ok(self
            .client
            .post(self.url("/webhooks/identity"))
            .header("svix-id", id)
            .header("svix-timestamp", timestamp.to_string())
            .header("svix-signature", signature)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// Sync a new user through `user.created` and log them in
    pub async fn sign_up(&self, first_name: &str, last_name: &str) -> Result<TestUser> {
        let external_id = format!("user_{}", unique_suffix());
        let response = self
            .send_webhook(
                "user.created",
                json!({
                    "id": external_id,
                    "first_name": first_name,
                    "last_name": last_name,
                    "email_addresses": [
                        { "email_address": format!("{}@example.com", external_id) }
                    ],
                    "image_url": format!("https://img.example.com/{external_id}.png"),
                }),
            )
            .await?;
        assert_status(response, StatusCode::OK).await?;

        let token = self.token_for(&external_id)?;
        let me: CurrentUser = assert_json(self.get_auth("/api/v1/users/@me", &token).await?, StatusCode::OK).await?;

        Ok(TestUser {
            id: me.id,
            external_id,
            name: me.name,
            token,
        })
    }

    /// Trigger a contest run the way an external scheduler does
    pub async fn run_contest(&self) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/internal/contest/run"))
            .header("x-scheduler-key", SCHEDULER_KEY)
            .send()
            .await?)
    }

    fn authed(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a PUT request with auth token and no body
    pub async fn put_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.put(self.url(path)), token).send().await?)
    }

    /// Upload raw bytes to an issued upload URL
    pub async fn put_bytes_auth(
        &self,
        url: &str,
        token: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Response> {
        Ok(self
            .authed(self.client.put(self.url(url)), token)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.delete(self.url(path)), token).send().await?)
    }
}

/// Configuration for a server on the in-process store
pub fn test_config(upload_dir: &TempDir, addr: SocketAddr) -> Result<AppConfig> {
    let upload_dir = upload_dir.path().to_string_lossy().into_owned();
    let public_base_url = format!("http://{addr}");

    AppConfig::from_lookup(|key| {
        let value = match key {
            "DATABASE_URL" => "memory://",
            "AUTH_JWT_SECRET" => JWT_SECRET,
            "AUTH_ISSUER" => ISSUER,
            "AUTH_APP_DOMAIN" => APP_DOMAIN,
            "AUTH_LEEWAY_SECS" => "0",
            "WEBHOOK_SECRET" => WEBHOOK_SECRET,
            "UPLOAD_DIR" => upload_dir.as_str(),
            "MEDIA_PUBLIC_BASE_URL" => public_base_url.as_str(),
            "MAX_FILE_SIZE_MB" => "1",
            "CONTEST_SCHEDULER_ENABLED" => "false",
            "CONTEST_TRIGGER_KEY" => SCHEDULER_KEY,
            "RATE_LIMIT_ENABLED" => "false",
            _ => return None,
        };
        Some(value.to_string())
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error status and return the envelope's `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: Value = assert_json(response, expected_status).await?;
    Ok(body["error"]["code"].as_str().unwrap_or_default().to_string())
}
