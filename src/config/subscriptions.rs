//! Subscription service configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Where subscription updates are sent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionsConfig {
    /// Endpoint receiving `POST` updates; the in-memory store is used when unset
    pub updater_url: Option<String>,
}

impl SubscriptionsConfig {
    /// Validate subscription service configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let Some(url) = &self.updater_url else {
            return Ok(());
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidUpdaterUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::UpdaterUrlMustBeHttps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_url_is_valid() {
        let config = SubscriptionsConfig::default();
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_url_without_scheme_is_invalid() {
        let config = SubscriptionsConfig {
            updater_url: Some("subscriptions.internal/update".to_string()),
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidUpdaterUrl)
        );
    }

    #[test]
    fn test_plain_http_allowed_outside_production() {
        let config = SubscriptionsConfig {
            updater_url: Some("http://localhost:4000/subscriptions".to_string()),
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::UpdaterUrlMustBeHttps)
        );
    }
}
