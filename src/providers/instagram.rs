use crate::core::error::ConfigError;
use crate::core::models::Provider;
use crate::core::settings::InstagramSettings;
use crate::providers::{ApiClient, ProviderClient};
use crate::stream::{InstagramAdapter, PollingStream, StreamOptions};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Instagram {
    api: ApiClient,
}

impl Instagram {
    pub fn new(settings: &InstagramSettings) -> Result<Self, ConfigError> {
        let client_id = required(settings.client_id.as_deref(), "client_id")?;
        let access_token = required(settings.access_token.as_deref(), "access_token")?;

        let api = ApiClient::new(
            Provider::Instagram,
            settings.base_url.as_deref(),
            settings.api_version.as_deref(),
        )?
        .with_auth_param("client_id", client_id)
        .with_auth_param("access_token", access_token);

        Ok(Self { api })
    }

    /// Works on every endpoint accepting `min_tag_id`, e.g.
    /// `tags/{tag-name}/media/recent`.
    pub fn stream(&self, endpoint: &str, options: StreamOptions) -> PollingStream {
        PollingStream::new(
            Arc::new(self.api.clone()),
            endpoint,
            Arc::new(InstagramAdapter),
            options,
        )
    }
}

impl ProviderClient for Instagram {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField {
            provider: Provider::Instagram,
            field,
        })
}
