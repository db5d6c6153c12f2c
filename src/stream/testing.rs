use crate::core::error::RequestError;
use crate::core::models::{Params, Provider};
use crate::providers::HttpRequester;
use crate::stream::StreamEvent;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;

/// Replays queued responses, then keeps answering with `fallback`.
pub struct ScriptedRequester {
    responses: Mutex<VecDeque<Result<Value, RequestError>>>,
    fallback: Mutex<Value>,
    latency: Option<Duration>,
    calls: Mutex<Vec<Params>>,
}

impl ScriptedRequester {
    pub fn new(fallback: Value) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            latency: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: RequestError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn set_fallback(&self, fallback: Value) {
        *self.fallback.lock() = fallback;
    }

    pub fn calls(&self) -> Vec<Params> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpRequester for ScriptedRequester {
    fn provider(&self) -> Provider {
        Provider::Instagram
    }

    async fn get(&self, _path: &str, params: &Params) -> Result<Value, RequestError> {
        self.calls.lock().push(params.clone());
        let next = self.responses.lock().pop_front();
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        next.unwrap_or_else(|| Ok(self.fallback.lock().clone()))
    }

    async fn post(&self, _path: &str, _params: &Params) -> Result<Value, RequestError> {
        Ok(Value::Null)
    }

    async fn delete(&self, _path: &str, _params: &Params) -> Result<Value, RequestError> {
        Ok(Value::Null)
    }
}

/// Facebook-shaped post updated at `date`.
pub fn post_at(id: &str, date: DateTime<Utc>) -> Value {
    json!({ "id": id, "message": id, "updated_time": date.to_rfc3339() })
}

/// Facebook-shaped post one hour before now.
pub fn old_post(id: &str) -> Value {
    post_at(id, Utc::now() - ChronoDuration::hours(1))
}

/// Facebook-shaped post one hour after now.
pub fn new_post(id: &str) -> Value {
    post_at(id, Utc::now() + ChronoDuration::hours(1))
}

/// Instagram-shaped media one hour after now.
pub fn new_media(id: &str) -> Value {
    let created = (Utc::now() + ChronoDuration::hours(1)).timestamp();
    json!({ "id": id, "created_time": created.to_string() })
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<StreamEvent>) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn messages(events: &[StreamEvent]) -> Vec<Value> {
    events
        .iter()
        .filter_map(|event| match event {
            StreamEvent::Message(value) => Some(value.clone()),
            StreamEvent::Error(_) => None,
        })
        .collect()
}
