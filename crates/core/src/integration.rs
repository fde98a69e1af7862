//! Alerting integration payload synthesis.
//!
//! An integration carries exactly one secret, chosen by its type: PagerDuty
//! integrations send an API key, Slack integrations send a webhook URL. The
//! secret belonging to the other type is never sent, even when configured.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::encode::encode_payload;
use crate::error::{CoreResult, PayloadOperation};

// ---------------------------------------------------------------------------
// Integration types
// ---------------------------------------------------------------------------

pub const INTEGRATION_TYPE_PAGERDUTY: &str = "PagerDuty";

pub const INTEGRATION_TYPE_SLACK: &str = "Slack";

/// All valid integration type values.
pub const VALID_INTEGRATION_TYPES: &[&str] = &[INTEGRATION_TYPE_PAGERDUTY, INTEGRATION_TYPE_SLACK];

/// Resource label used in error messages.
const RESOURCE: &str = "integration";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// An integration as declared by the user. `enabled` has no default and
/// must be stated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct IntegrationConfig {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

/// The secret an integration sends, tagged by integration type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IntegrationSecret {
    PagerDuty {
        #[serde(rename = "apiKey")]
        api_key: String,
    },
    Slack {
        #[serde(rename = "webhookUrl")]
        webhook_url: String,
    },
}

impl IntegrationConfig {
    /// Select the secret that matches the integration type.
    ///
    /// A recognized type always yields its secret key, sent as `""` when
    /// unset. Unrecognized types yield no secret.
    pub fn secret(&self) -> Option<IntegrationSecret> {
        match self.integration_type.as_str() {
            INTEGRATION_TYPE_PAGERDUTY => Some(IntegrationSecret::PagerDuty {
                api_key: self.api_key.clone().unwrap_or_default(),
            }),
            INTEGRATION_TYPE_SLACK => Some(IntegrationSecret::Slack {
                webhook_url: self.webhook_url.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Request body for creating or updating an integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationPayload {
    pub name: String,
    pub enabled: bool,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(flatten)]
    pub secret: Option<IntegrationSecret>,
}

impl IntegrationPayload {
    pub fn from_config(config: &IntegrationConfig) -> Self {
        Self {
            name: config.name.clone(),
            enabled: config.enabled,
            integration_type: config.integration_type.clone(),
            secret: config.secret(),
        }
    }
}

/// Build the encoded request body for an integration.
pub fn build_integration_payload(
    config: &IntegrationConfig,
    operation: PayloadOperation,
) -> CoreResult<Vec<u8>> {
    let payload = IntegrationPayload::from_config(config);
    tracing::debug!(
        %operation,
        name = %payload.name,
        integration_type = %payload.integration_type,
        has_secret = payload.secret.is_some(),
        "Building integration payload",
    );
    encode_payload(&payload, RESOURCE, operation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
