use crate::cli::{load_settings, parse_provider};
use anyhow::Result;
use social_api::providers::build_stream;
use social_api::stream::{StreamEvent, StreamOptions};
use std::path::Path;
use std::time::Duration;

pub async fn run(
    config: Option<&Path>,
    provider: &str,
    endpoint: &str,
    interval_ms: Option<u64>,
    min_tag_id: Option<String>,
) -> Result<()> {
    let settings = load_settings(config)?;
    let provider = parse_provider(provider)?;

    if interval_ms == Some(0) {
        anyhow::bail!("--interval-ms must be greater than 0");
    }

    let options = StreamOptions {
        interval: interval_ms.map(Duration::from_millis),
        run_on_creation: false,
        cursor: min_tag_id,
    };
    let stream = build_stream(provider, &settings, endpoint, options)?;
    let mut events = stream.subscribe();
    stream.start();

    tracing::info!(
        %provider,
        endpoint,
        interval_ms = stream.interval().as_millis() as u64,
        "Streaming, press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(StreamEvent::Message(item)) => println!("{}", serde_json::to_string(&item)?),
                Some(StreamEvent::Error(err)) => tracing::error!(error = %err, "Poll failed"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping stream");
                break;
            }
        }
    }

    stream.stop();
    Ok(())
}
