use crate::core::error::ConfigError;
use crate::core::models::Provider;
use crate::core::settings::TumblrSettings;
use crate::providers::{ApiClient, ProviderClient};
use crate::stream::{PollingStream, StreamOptions, TumblrAdapter};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Tumblr {
    api: ApiClient,
}

impl Tumblr {
    pub fn new(settings: &TumblrSettings) -> Result<Self, ConfigError> {
        let consumer_key = settings
            .consumer_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField {
                provider: Provider::Tumblr,
                field: "consumer_key",
            })?;

        let api = ApiClient::new(
            Provider::Tumblr,
            settings.base_url.as_deref(),
            settings.api_version.as_deref(),
        )?
        .with_auth_param("api_key", consumer_key);

        Ok(Self { api })
    }

    /// e.g. `blog/{blog-identifier}/posts`
    pub fn stream(&self, endpoint: &str, options: StreamOptions) -> PollingStream {
        PollingStream::new(
            Arc::new(self.api.clone()),
            endpoint,
            Arc::new(TumblrAdapter),
            options,
        )
    }
}

impl ProviderClient for Tumblr {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}
