use crate::core::error::ConfigError;
use crate::core::models::Provider;
use crate::core::settings::TwitterSettings;
use crate::providers::{ApiClient, ProviderClient};

/// REST client using app-only (bearer token) authentication.
#[derive(Debug, Clone)]
pub struct Twitter {
    api: ApiClient,
}

impl Twitter {
    pub fn new(settings: &TwitterSettings) -> Result<Self, ConfigError> {
        let bearer_token = settings
            .bearer_token
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField {
                provider: Provider::Twitter,
                field: "bearer_token",
            })?;

        let api = ApiClient::new(
            Provider::Twitter,
            settings.base_url.as_deref(),
            settings.api_version.as_deref(),
        )?
        .with_path_suffix(".json")
        .with_bearer_token(bearer_token)?;

        Ok(Self { api })
    }
}

impl ProviderClient for Twitter {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Params;
    use reqwest::Method;

    #[test]
    fn test_requires_bearer_token() {
        let err = Twitter::new(&TwitterSettings::default()).unwrap_err();
        assert!(err.to_string().contains("bearer_token"));
    }

    #[test]
    fn test_request_shape() {
        let settings = TwitterSettings {
            bearer_token: Some("token".to_string()),
            ..Default::default()
        };
        let twitter = Twitter::new(&settings).unwrap();
        let mut params = Params::new();
        params.insert("q".to_string(), "#sunset".to_string());

        let request = twitter
            .api()
            .build_request(Method::GET, "search/tweets", &params)
            .unwrap();
        assert_eq!(request.url().path(), "/1.1/search/tweets.json");
        assert_eq!(request.url().query(), Some("q=%23sunset"));
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer token"
        );
    }
}
