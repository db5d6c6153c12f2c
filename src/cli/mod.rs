pub mod request;
pub mod stream;

use anyhow::{Context, Result};
use social_api::core::models::Params;
use social_api::core::settings::Settings;
use social_api::core::Provider;
use std::path::Path;

pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    settings.validate()?;
    Ok(settings)
}

pub fn parse_provider(name: &str) -> Result<Provider> {
    Provider::from_name(name).with_context(|| {
        let valid: Vec<_> = Provider::ALL.iter().map(|p| p.name()).collect();
        format!("Unknown provider: {}. Valid providers: {}", name, valid.join(", "))
    })
}

/// Parses repeated `key=value` arguments.
pub fn parse_params(pairs: &[String]) -> Result<Params> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .with_context(|| format!("Invalid parameter {pair:?}, expected key=value"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&["q=#sunset".to_string(), "count=5=x".to_string()]).unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("#sunset"));
        assert_eq!(params.get("count").map(String::as_str), Some("5=x"));

        assert!(parse_params(&["novalue".to_string()]).is_err());
        assert!(parse_params(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("Instagram").unwrap(), Provider::Instagram);
        let err = parse_provider("myspace").unwrap_err();
        assert!(err.to_string().contains("Valid providers: facebook"));
    }
}
