use crate::core::error::{ConfigError, RequestError};
use crate::core::models::{Params, Provider};
use crate::providers::ProviderClient;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, Url};
use serde_json::Value;

/// Request capability shared by every provider client.
///
/// Polling streams only depend on this trait, so anything able to answer a
/// GET with a JSON document can drive one.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    fn provider(&self) -> Provider;

    async fn get(&self, path: &str, params: &Params) -> Result<Value, RequestError>;

    async fn post(&self, path: &str, params: &Params) -> Result<Value, RequestError>;

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, RequestError>;
}

/// Builds and sends authenticated requests for one provider.
#[derive(Debug, Clone)]
pub struct ApiClient {
    provider: Provider,
    http: reqwest::Client,
    api_url: String,
    path_suffix: &'static str,
    auth_params: Params,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(
        provider: Provider,
        base_url: Option<&str>,
        api_version: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base = base_url
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/');

        Url::parse(base).map_err(|_| ConfigError::InvalidBaseUrl {
            provider,
            url: base.to_string(),
        })?;

        let api_url = match api_version.or(provider.default_api_version()) {
            Some(version) => format!("{base}/{version}"),
            None => base.to_string(),
        };

        Ok(Self {
            provider,
            http: reqwest::Client::new(),
            api_url,
            path_suffix: "",
            auth_params: Params::new(),
            headers: HeaderMap::new(),
        })
    }

    pub fn with_auth_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.auth_params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_bearer_token(mut self, token: &str) -> Result<Self, ConfigError> {
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ConfigError::InvalidHeader {
                provider: self.provider,
                field: "bearer_token",
            }
        })?;
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, ConfigError> {
        let value = HeaderValue::from_str(user_agent).map_err(|_| ConfigError::InvalidHeader {
            provider: self.provider,
            field: "user_agent",
        })?;
        self.headers.insert(USER_AGENT, value);
        Ok(self)
    }

    /// Appended to every request path (Twitter wants `.json`).
    pub fn with_path_suffix(mut self, suffix: &'static str) -> Self {
        self.path_suffix = suffix;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth_params(&self) -> &Params {
        &self.auth_params
    }

    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.api_url,
            path.trim_start_matches('/'),
            self.path_suffix
        )
    }

    /// Auth params first, caller params override them.
    fn merged_params(&self, params: &Params) -> Params {
        let mut merged = self.auth_params.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<reqwest::Request, RequestError> {
        let merged = self.merged_params(params);
        let builder = self
            .http
            .request(method.clone(), self.url_for(path))
            .headers(self.headers.clone());

        let builder = if method == Method::POST {
            builder.form(&merged)
        } else {
            builder.query(&merged)
        };

        Ok(builder.build()?)
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<Value, RequestError> {
        let request = self.build_request(method, path, params)?;
        tracing::debug!(
            provider = %self.provider,
            method = %request.method(),
            path,
            "Sending request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(provider = %self.provider, status = status.as_u16(), "Request failed");
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: parse_body_lossy(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn parse_body_lossy(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

impl ProviderClient for ApiClient {
    fn api(&self) -> &ApiClient {
        self
    }
}
