use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use shared_config::AppConfig;
use shared_utils::contact::mask_contact;

use crate::error::NotificationError;
use crate::models::OTP_TTL_MINUTES;

/// Delivers a one-time code to the phone number it was issued for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send_code(&self, contact_value: &str, code: &str) -> Result<(), NotificationError>;
}

pub struct SmsGatewaySender {
    client: Client,
    url: String,
    token: String,
    sender_id: String,
}

impl SmsGatewaySender {
    pub fn new(url: &str, token: &str, sender_id: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            token: token.to_string(),
            sender_id: sender_id.to_string(),
        }
    }

    fn message_for(code: &str) -> String {
        format!(
            "Your dental appointment verification code is {}. It expires in {} minutes.",
            code, OTP_TTL_MINUTES
        )
    }
}

#[async_trait]
impl CodeSender for SmsGatewaySender {
    async fn send_code(&self, contact_value: &str, code: &str) -> Result<(), NotificationError> {
        debug!("Sending verification SMS to {}", mask_contact(contact_value));

        let response = self.client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&json!({
                "to": contact_value,
                "from": self.sender_id,
                "message": Self::message_for(code),
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("SMS gateway error ({}): {}", status, body);
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Used when no SMS gateway is configured. Records that a send happened
/// without ever writing the code to the log.
pub struct LogOnlySender;

#[async_trait]
impl CodeSender for LogOnlySender {
    async fn send_code(&self, contact_value: &str, _code: &str) -> Result<(), NotificationError> {
        info!(
            "SMS gateway not configured; verification code for {} was not delivered",
            mask_contact(contact_value)
        );
        Ok(())
    }
}

pub fn sender_from_config(config: &AppConfig) -> Arc<dyn CodeSender> {
    match (&config.sms_gateway_url, &config.sms_gateway_token) {
        (Some(url), Some(token)) => {
            Arc::new(SmsGatewaySender::new(url, token, &config.sms_sender_id))
        }
        _ => Arc::new(LogOnlySender),
    }
}
