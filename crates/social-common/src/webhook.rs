//! Identity-provider webhook signatures
//!
//! Deliveries are signed Svix-style: the signed content is
//! `"{svix-id}.{svix-timestamp}.{body}"`, the MAC is HMAC-SHA256 keyed with
//! the base64 payload of a `whsec_…` secret, and `svix-signature` carries one
//! or more space-separated `v1,<base64 mac>` entries.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

pub const HEADER_ID: &str = "svix-id";
pub const HEADER_TIMESTAMP: &str = "svix-timestamp";
pub const HEADER_SIGNATURE: &str = "svix-signature";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("webhook secret is not valid base64")]
    InvalidSecret,

    #[error("invalid timestamp header")]
    InvalidTimestamp,

    #[error("timestamp outside the allowed tolerance")]
    StaleTimestamp,

    #[error("no matching signature")]
    InvalidSignature,
}

/// The three signature headers of a delivery
#[derive(Debug, Clone, Copy)]
pub struct WebhookHeaders<'a> {
    pub id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

impl<'a> WebhookHeaders<'a> {
    /// Collect headers through a lookup, failing on the first one absent
    ///
    /// # Errors
    /// `MissingHeader` naming the absent header
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WebhookError>
    where
        F: Fn(&'static str) -> Option<&'a str>,
    {
        Ok(Self {
            id: lookup(HEADER_ID).ok_or(WebhookError::MissingHeader(HEADER_ID))?,
            timestamp: lookup(HEADER_TIMESTAMP).ok_or(WebhookError::MissingHeader(HEADER_TIMESTAMP))?,
            signature: lookup(HEADER_SIGNATURE).ok_or(WebhookError::MissingHeader(HEADER_SIGNATURE))?,
        })
    }
}

/// Verifies (and, for tooling, produces) webhook signatures
#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// # Errors
    /// `InvalidSecret` when the secret is not base64 after the optional `whsec_` prefix
    pub fn new(secret: &str, tolerance_secs: i64) -> Result<Self, WebhookError> {
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| WebhookError::InvalidSecret)?;
        Ok(Self {
            key,
            tolerance_secs,
        })
    }

    /// # Errors
    /// See [`WebhookVerifier::verify_at`]
    pub fn verify(&self, headers: &WebhookHeaders<'_>, body: &[u8]) -> Result<(), WebhookError> {
        self.verify_at(headers, body, Utc::now().timestamp())
    }

    /// Check a delivery as if the current time were `now` (unix seconds)
    ///
    /// # Errors
    /// Fails when the timestamp is malformed or stale, or when no `v1` entry matches
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders<'_>,
        body: &[u8],
        now: i64,
    ) -> Result<(), WebhookError> {
        let timestamp: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp)?;
        if now.abs_diff(timestamp) > self.tolerance_secs.unsigned_abs() {
            return Err(WebhookError::StaleTimestamp);
        }

        let mac = self.mac(headers.id, headers.timestamp.trim(), body);
        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, sig)| STANDARD.decode(sig).ok())
            .any(|sig| mac.clone().verify_slice(&sig).is_ok());

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// `v1,<base64>` signature entry for a delivery
    pub fn sign(&self, id: &str, timestamp: i64, body: &[u8]) -> String {
        let mac = self.mac(id, &timestamp.to_string(), body);
        format!(
            "{SIGNATURE_VERSION},{}",
            STANDARD.encode(mac.finalize().into_bytes())
        )
    }

    fn mac(&self, id: &str, timestamp: &str, body: &[u8]) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        mac
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish_non_exhaustive()
    }
}
