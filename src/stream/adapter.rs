//! Provider response shapes.
//!
//! Each adapter turns a raw JSON response into the items a
//! [`PollingStream`](super::PollingStream) deduplicates: an identity, a
//! timestamp and the untouched item, plus an optional pagination cursor.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct StreamItem {
    pub identity: String,
    pub timestamp: DateTime<Utc>,
    pub raw: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<StreamItem>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdapterError {
    #[error("response has no `{0}` list")]
    MissingList(&'static str),

    #[error("item {index} has no usable `{field}` field")]
    MissingField { index: usize, field: &'static str },

    #[error("item {index} has an unparseable `{field}`: {value}")]
    InvalidTimestamp {
        index: usize,
        field: &'static str,
        value: String,
    },
}

pub trait ResponseAdapter: Send + Sync {
    fn extract(&self, response: &Value) -> Result<Page, AdapterError>;

    /// Request parameter carrying the cursor back to the provider.
    fn cursor_param(&self) -> Option<&'static str> {
        None
    }

    fn default_interval(&self) -> Duration;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FacebookAdapter;

#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramAdapter;

#[derive(Debug, Clone, Copy, Default)]
pub struct TumblrAdapter;

impl ResponseAdapter for FacebookAdapter {
    fn extract(&self, response: &Value) -> Result<Page, AdapterError> {
        let posts = list_at(response, &["data"], "data")?;
        let items = posts
            .iter()
            .enumerate()
            .map(|(index, post)| {
                let raw = text_field(post, index, "updated_time")?;
                let timestamp = parse_datetime(raw).ok_or_else(|| invalid(index, "updated_time", raw))?;
                item(post, index, timestamp)
            })
            .collect::<Result<_, _>>()?;

        Ok(Page {
            items,
            next_cursor: None,
        })
    }

    fn default_interval(&self) -> Duration {
        Duration::from_secs(20)
    }
}

impl ResponseAdapter for InstagramAdapter {
    fn extract(&self, response: &Value) -> Result<Page, AdapterError> {
        let media = list_at(response, &["data"], "data")?;
        let items = media
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let timestamp = unix_seconds(entry, index, "created_time")?;
                item(entry, index, timestamp)
            })
            .collect::<Result<_, _>>()?;

        let next_cursor = response
            .pointer("/pagination/min_tag_id")
            .and_then(identity_string);

        Ok(Page { items, next_cursor })
    }

    fn cursor_param(&self) -> Option<&'static str> {
        Some("min_tag_id")
    }

    fn default_interval(&self) -> Duration {
        Duration::from_secs(10)
    }
}

impl ResponseAdapter for TumblrAdapter {
    fn extract(&self, response: &Value) -> Result<Page, AdapterError> {
        let posts = list_at(response, &["response", "posts"], "response.posts")?;
        let items = posts
            .iter()
            .enumerate()
            .map(|(index, post)| {
                let raw = text_field(post, index, "date")?;
                let timestamp = parse_datetime(raw).ok_or_else(|| invalid(index, "date", raw))?;
                item(post, index, timestamp)
            })
            .collect::<Result<_, _>>()?;

        Ok(Page {
            items,
            next_cursor: None,
        })
    }

    fn default_interval(&self) -> Duration {
        Duration::from_secs(20)
    }
}

fn list_at<'a>(
    response: &'a Value,
    path: &[&str],
    name: &'static str,
) -> Result<&'a Vec<Value>, AdapterError> {
    path.iter()
        .try_fold(response, |value, key| value.get(key))
        .and_then(Value::as_array)
        .ok_or(AdapterError::MissingList(name))
}

fn item(raw: &Value, index: usize, timestamp: DateTime<Utc>) -> Result<StreamItem, AdapterError> {
    let identity = raw
        .get("id")
        .and_then(identity_string)
        .ok_or(AdapterError::MissingField { index, field: "id" })?;

    Ok(StreamItem {
        identity,
        timestamp,
        raw: raw.clone(),
    })
}

/// Ids arrive as strings from most providers and as numbers from Tumblr.
fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field<'a>(raw: &'a Value, index: usize, field: &'static str) -> Result<&'a str, AdapterError> {
    raw.get(field)
        .and_then(Value::as_str)
        .ok_or(AdapterError::MissingField { index, field })
}

fn unix_seconds(raw: &Value, index: usize, field: &'static str) -> Result<DateTime<Utc>, AdapterError> {
    let value = raw
        .get(field)
        .ok_or(AdapterError::MissingField { index, field })?;

    let millis = match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|s| s.checked_mul(1000))
            .or_else(|| n.as_f64().and_then(seconds_to_millis)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .and_then(|s| s.checked_mul(1000))
                .or_else(|| s.parse::<f64>().ok().and_then(seconds_to_millis))
        }
        _ => None,
    }
    .ok_or_else(|| invalid(index, field, &value.to_string()))?;

    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| invalid(index, field, &value.to_string()))
}

fn seconds_to_millis(seconds: f64) -> Option<i64> {
    let millis = (seconds * 1000.0).round();
    (millis.is_finite() && millis.abs() < i64::MAX as f64).then_some(millis as i64)
}

/// Accepts RFC 3339, the Graph API's `+0000` offsets and Tumblr's
/// `2016-01-01 00:00:00 GMT`.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = raw.strip_suffix(" GMT") {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.and_utc());
        }
    }
    None
}

fn invalid(index: usize, field: &'static str, value: &str) -> AdapterError {
    AdapterError::InvalidTimestamp {
        index,
        field,
        value: value.to_string(),
    }
}
