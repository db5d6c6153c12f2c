mod client;
mod facebook;
mod github;
mod instagram;
mod tumblr;
mod twitter;

use crate::core::error::{ConfigError, RequestError};
use crate::core::models::{Params, Provider};
use crate::core::settings::Settings;
use crate::stream::{PollingStream, StreamOptions};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

pub use client::{ApiClient, HttpRequester};
pub use facebook::Facebook;
pub use github::Github;
pub use instagram::Instagram;
pub use tumblr::Tumblr;
pub use twitter::Twitter;

/// A provider client built on top of a shared [`ApiClient`].
pub trait ProviderClient: Send + Sync {
    fn api(&self) -> &ApiClient;
}

#[async_trait]
impl<T: ProviderClient> HttpRequester for T {
    fn provider(&self) -> Provider {
        self.api().provider()
    }

    async fn get(&self, path: &str, params: &Params) -> Result<Value, RequestError> {
        self.api().send(Method::GET, path, params).await
    }

    async fn post(&self, path: &str, params: &Params) -> Result<Value, RequestError> {
        self.api().send(Method::POST, path, params).await
    }

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, RequestError> {
        self.api().send(Method::DELETE, path, params).await
    }
}

/// Builds the client for `provider` from the matching config section.
pub fn build_requester(
    provider: Provider,
    settings: &Settings,
) -> Result<Arc<dyn HttpRequester>, ConfigError> {
    let requester: Arc<dyn HttpRequester> = match provider {
        Provider::Facebook => Arc::new(Facebook::new(&settings.facebook)?),
        Provider::Instagram => Arc::new(Instagram::new(&settings.instagram)?),
        Provider::Tumblr => Arc::new(Tumblr::new(&settings.tumblr)?),
        Provider::Twitter => Arc::new(Twitter::new(&settings.twitter)?),
        Provider::Github => Arc::new(Github::new(&settings.github)?),
    };
    Ok(requester)
}

/// Builds a stream for one of the streaming providers, applying the interval
/// overrides from `[stream]` unless `options` already sets one.
pub fn build_stream(
    provider: Provider,
    settings: &Settings,
    endpoint: &str,
    mut options: StreamOptions,
) -> Result<PollingStream, ConfigError> {
    if !provider.supports_streaming() {
        return Err(ConfigError::StreamUnsupported(provider));
    }

    if options.interval.is_none() {
        let specific = match provider {
            Provider::Facebook => settings.stream.facebook_interval_ms,
            Provider::Instagram => settings.stream.instagram_interval_ms,
            Provider::Tumblr => settings.stream.tumblr_interval_ms,
            Provider::Twitter | Provider::Github => None,
        };
        options.interval = specific
            .or(settings.stream.interval_ms)
            .map(std::time::Duration::from_millis);
    }

    match provider {
        Provider::Facebook => Ok(Facebook::new(&settings.facebook)?.stream(endpoint, options)),
        Provider::Instagram => Ok(Instagram::new(&settings.instagram)?.stream(endpoint, options)),
        Provider::Tumblr => Ok(Tumblr::new(&settings.tumblr)?.stream(endpoint, options)),
        Provider::Twitter | Provider::Github => Err(ConfigError::StreamUnsupported(provider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{GithubSettings, TumblrSettings, TwitterSettings};
    use std::time::Duration;

    fn settings_with_tumblr() -> Settings {
        Settings {
            tumblr: TumblrSettings {
                consumer_key: Some("key".to_string()),
                ..Default::default()
            },
            github: GithubSettings {
                public: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_build_requester_reports_provider() {
        let settings = settings_with_tumblr();
        let requester = build_requester(Provider::Github, &settings).unwrap();
        assert_eq!(requester.provider(), Provider::Github);

        let err = build_requester(Provider::Instagram, &settings).err().unwrap();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_build_stream_rejects_non_streaming_provider() {
        let settings = settings_with_tumblr();
        let options = StreamOptions {
            run_on_creation: false,
            ..Default::default()
        };
        let err = build_stream(Provider::Github, &settings, "events", options)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "github does not support streaming");
    }

    #[tokio::test]
    async fn test_build_stream_follows_supports_streaming() {
        let settings = Settings {
            twitter: TwitterSettings {
                bearer_token: Some("token".to_string()),
                ..Default::default()
            },
            ..settings_with_tumblr()
        };

        for provider in Provider::ALL {
            let options = StreamOptions {
                run_on_creation: false,
                ..Default::default()
            };
            let result = build_stream(provider, &settings, "endpoint", options);
            if provider.supports_streaming() {
                assert!(
                    !matches!(result, Err(ConfigError::StreamUnsupported(_))),
                    "{provider} should stream"
                );
            } else {
                assert!(
                    matches!(result, Err(ConfigError::StreamUnsupported(p)) if p == provider),
                    "{provider} should not stream"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_build_stream_applies_interval_overrides() {
        let mut settings = settings_with_tumblr();
        settings.stream.interval_ms = Some(5000);

        let stream = build_stream(
            Provider::Tumblr,
            &settings,
            "blog/staff/posts",
            StreamOptions {
                run_on_creation: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(stream.interval(), Duration::from_millis(5000));

        settings.stream.tumblr_interval_ms = Some(7000);
        let stream = build_stream(
            Provider::Tumblr,
            &settings,
            "blog/staff/posts",
            StreamOptions {
                run_on_creation: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(stream.interval(), Duration::from_millis(7000));
    }

    #[tokio::test]
    async fn test_build_stream_uses_provider_default_interval() {
        let settings = settings_with_tumblr();
        let stream = build_stream(
            Provider::Tumblr,
            &settings,
            "blog/staff/posts",
            StreamOptions {
                run_on_creation: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(stream.interval(), Duration::from_secs(20));
        assert_eq!(stream.endpoint(), "blog/staff/posts");
    }
}
