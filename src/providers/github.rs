use crate::core::error::ConfigError;
use crate::core::models::Provider;
use crate::core::settings::GithubSettings;
use crate::providers::{ApiClient, ProviderClient};

const DEFAULT_USER_AGENT: &str = concat!("social-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Github {
    api: ApiClient,
}

impl Github {
    /// Public mode skips the access token and only reaches unauthenticated
    /// endpoints.
    pub fn new(settings: &GithubSettings) -> Result<Self, ConfigError> {
        let access_token = settings.access_token.as_deref().filter(|v| !v.is_empty());
        if access_token.is_none() && !settings.public {
            return Err(ConfigError::MissingField {
                provider: Provider::Github,
                field: "access_token",
            });
        }

        let mut api = ApiClient::new(Provider::Github, settings.base_url.as_deref(), None)?
            .with_user_agent(settings.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))?;
        if let Some(token) = access_token {
            api = api.with_auth_param("access_token", token);
        }

        Ok(Self { api })
    }
}

impl ProviderClient for Github {
    fn api(&self) -> &ApiClient {
        &self.api
    }
}
