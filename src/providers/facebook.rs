use crate::core::error::ConfigError;
use crate::core::models::Provider;
use crate::core::settings::FacebookSettings;
use crate::providers::{ApiClient, ProviderClient};
use crate::stream::{FacebookAdapter, PollingStream, StreamOptions};
use std::sync::Arc;

/// Graph API client. Authenticates with a user access token, or with an app
/// token built from the app id and secret.
#[derive(Debug, Clone)]
pub struct Facebook {
    api: ApiClient,
}

impl Facebook {
    pub fn new(settings: &FacebookSettings) -> Result<Self, ConfigError> {
        let access_token = match &settings.access_token {
            Some(token) if !token.is_empty() => token.clone(),
            _ => {
                let app_id = required(settings.app_id.as_deref(), "app_id")?;
                let app_secret = required(settings.app_secret.as_deref(), "app_secret")?;
                format!("{app_id}|{app_secret}")
            }
        };

        let api = ApiClient::new(
            Provider::Facebook,
            settings.base_url.as_deref(),
            settings.api_version.as_deref(),
        )?
        .with_auth_param("access_token", access_token);

        Ok(Self { api })
    }

    /// Polls `endpoint` for posts updated after the stream starts.
    pub fn stream(&self, endpoint: &str, options: StreamOptions) -> PollingStream {
        PollingStream::new(
            Arc::new(self.api.clone()),
            endpoint,
            Arc::new(FacebookAdapter),
            options,
        )
    }
}

impl ProviderClient for Facebook {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField {
            provider: Provider::Facebook,
            field,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_app_credentials_without_token() {
        let err = Facebook::new(&FacebookSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "facebook: No app_id provided");

        let settings = FacebookSettings {
            app_id: Some("app".to_string()),
            ..Default::default()
        };
        let err = Facebook::new(&settings).unwrap_err();
        assert_eq!(err.to_string(), "facebook: No app_secret provided");
    }

    #[test]
    fn test_app_token_from_id_and_secret() {
        let settings = FacebookSettings {
            app_id: Some("app".to_string()),
            app_secret: Some("secret".to_string()),
            ..Default::default()
        };
        let facebook = Facebook::new(&settings).unwrap();
        assert_eq!(
            facebook.api().auth_params().get("access_token").map(String::as_str),
            Some("app|secret")
        );
        assert_eq!(facebook.api().api_url(), "https://graph.facebook.com/v2.9");
    }

    #[test]
    fn test_access_token_wins() {
        let settings = FacebookSettings {
            app_id: Some("app".to_string()),
            app_secret: Some("secret".to_string()),
            access_token: Some("user-token".to_string()),
            api_version: Some("v2.5".to_string()),
            base_url: None,
        };
        let facebook = Facebook::new(&settings).unwrap();
        assert_eq!(
            facebook.api().auth_params().get("access_token").map(String::as_str),
            Some("user-token")
        );
        assert_eq!(facebook.api().api_url(), "https://graph.facebook.com/v2.5");
    }
}
