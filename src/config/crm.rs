//! CRM configuration (HubSpot)

use serde::Deserialize;

use super::error::ValidationError;

/// CRM forwarding configuration.
///
/// Lead forwarding is optional: with no API key configured the connector is
/// replaced by a no-op that logs and skips.
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    /// HubSpot private app token; forwarding is disabled when unset
    #[serde(default)]
    pub hubspot_api_key: Option<String>,

    /// Base URL for the HubSpot API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl CrmConfig {
    /// Whether CRM forwarding is configured
    pub fn is_enabled(&self) -> bool {
        self.hubspot_api_key.is_some()
    }

    /// Validate CRM configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.hubspot_api_key {
            if key.trim().is_empty() {
                return Err(ValidationError::BlankCrmKey);
            }
        }
        Ok(())
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            hubspot_api_key: None,
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.hubapi.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let config = CrmConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_with_key() {
        let config = CrmConfig {
            hubspot_api_key: Some("pat-na1-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_rejected() {
        let config = CrmConfig {
            hubspot_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
