use crate::cli::{load_settings, parse_params, parse_provider};
use anyhow::{Context, Result};
use social_api::providers::build_requester;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

pub async fn run(
    config: Option<&Path>,
    verb: Verb,
    provider: &str,
    endpoint: &str,
    params: &[String],
) -> Result<()> {
    let settings = load_settings(config)?;
    let provider = parse_provider(provider)?;
    let params = parse_params(params)?;
    let requester = build_requester(provider, &settings)?;

    tracing::debug!(%provider, endpoint, ?verb, "Sending request");
    let response = match verb {
        Verb::Get => requester.get(endpoint, &params).await,
        Verb::Post => requester.post(endpoint, &params).await,
        Verb::Delete => requester.delete(endpoint, &params).await,
    }
    .with_context(|| format!("{provider} request to {endpoint} failed"))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
