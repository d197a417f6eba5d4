//! HubSpot adapter - CRM connector port implementation.
//!
//! Creates a contact per captured lead via the HubSpot v3 objects API. When
//! no API key is configured the connector is replaced by [`DisabledCrm`],
//! which logs and skips.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::domain::lead::Lead;
use crate::ports::{CrmConnector, CrmError};

/// HubSpot implementation of [`CrmConnector`].
pub struct HubSpotConnector {
    api_key: SecretString,
    api_base_url: String,
    http: reqwest::Client,
}

impl HubSpotConnector {
    pub fn new(api_key: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: api_base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

/// Contact properties for a lead, per HubSpot's contact schema.
fn contact_properties(lead: &Lead) -> Value {
    json!({
        "properties": {
            "firstname": lead.first_name(),
            "lastname": lead.last_name(),
            "email": lead.email,
            "phone": lead.phone,
            "lead_source": lead.source,
            "lifecyclestage": "lead",
            "hs_lead_status": "NEW",
        }
    })
}

#[async_trait]
impl CrmConnector for HubSpotConnector {
    async fn push_lead(&self, lead: &Lead) -> Result<(), CrmError> {
        let url = format!("{}/crm/v3/objects/contacts", self.api_base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&contact_properties(lead))
            .send()
            .await
            .map_err(|e| CrmError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Api { status, body });
        }

        tracing::info!(lead_id = lead.id, "Lead forwarded to HubSpot");
        Ok(())
    }
}

/// No-op connector used when CRM forwarding is not configured.
pub struct DisabledCrm;

#[async_trait]
impl CrmConnector for DisabledCrm {
    async fn push_lead(&self, lead: &Lead) -> Result<(), CrmError> {
        tracing::debug!(lead_id = lead.id, "No CRM key configured, skipping sync");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lead(name: &str) -> Lead {
        Lead {
            id: 7,
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            phone: "+16095551234".to_string(),
            source: "guide".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn contact_properties_split_the_name() {
        let payload = contact_properties(&lead("Jane Q. Doe"));
        let props = &payload["properties"];

        assert_eq!(props["firstname"], "Jane");
        assert_eq!(props["lastname"], "Q. Doe");
        assert_eq!(props["email"], "jane@example.com");
        assert_eq!(props["lead_source"], "guide");
        assert_eq!(props["lifecyclestage"], "lead");
        assert_eq!(props["hs_lead_status"], "NEW");
    }

    #[test]
    fn single_word_name_has_empty_lastname() {
        let payload = contact_properties(&lead("Jane"));
        assert_eq!(payload["properties"]["firstname"], "Jane");
        assert_eq!(payload["properties"]["lastname"], "");
    }

    #[tokio::test]
    async fn disabled_crm_always_succeeds() {
        let result = DisabledCrm.push_lead(&lead("Jane")).await;
        assert!(result.is_ok());
    }
}
