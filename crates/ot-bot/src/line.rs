//! LINE Messaging API plumbing
//!
//! Webhook signature verification, the subset of the webhook event model the
//! bot reacts to, and a client for the reply endpoint.

use crate::{BotError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

/// Header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature LINE sends for `body`
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|_| BotError::InvalidSignature)?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Check a base64 HMAC-SHA256 signature over the raw request body
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Webhook request body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Message(MessageEvent),
    /// Follow, unfollow, postback and everything else
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    Text { id: String, text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Sends replies back into a chat
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()>;
}

/// Client for the LINE reply endpoint
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    reply_url: String,
    access_token: String,
}

impl LineClient {
    pub fn new(api_base: &str, access_token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            reply_url: format!("{}/v2/bot/message/reply", api_base.trim_end_matches('/')),
            access_token: access_token.to_string(),
        })
    }
}

#[async_trait]
impl Messenger for LineClient {
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        let request = ReplyRequest {
            reply_token,
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .http
            .post(&self.reply_url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::ReplyRejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "reply delivered");
        Ok(())
    }
}
