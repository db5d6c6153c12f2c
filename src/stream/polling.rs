use crate::core::error::RequestError;
use crate::core::models::Params;
use crate::providers::HttpRequester;
use crate::stream::adapter::{AdapterError, ResponseAdapter, StreamItem};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Events held back while nobody has subscribed yet; oldest are dropped first.
const MAX_PENDING_EVENTS: usize = 1024;

#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Falls back to the adapter's default when unset.
    pub interval: Option<Duration>,
    pub run_on_creation: bool,
    /// Initial pagination cursor, for adapters that have one.
    pub cursor: Option<String>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            interval: None,
            run_on_creation: true,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StreamEvent {
    Message(Value),
    Error(Arc<StreamError>),
}

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The provider wrapped its own error object in the response body.
    #[error("API error (status {status}): {error}")]
    Api { status: u16, error: Value },

    #[error(transparent)]
    Request(RequestError),

    #[error("malformed response: {0}")]
    Malformed(#[from] AdapterError),
}

impl From<RequestError> for StreamError {
    fn from(err: RequestError) -> Self {
        match (err.status(), err.api_error()) {
            (Some(status), Some(error)) => StreamError::Api {
                status,
                error: error.clone(),
            },
            _ => StreamError::Request(err),
        }
    }
}

/// Identities in discovery order, without duplicates.
#[derive(Debug, Default)]
struct SeenCache {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenCache {
    fn insert(&mut self, identity: &str) -> bool {
        if self.index.contains(identity) {
            return false;
        }
        self.index.insert(identity.to_string());
        self.order.push(identity.to_string());
        true
    }

    fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }
}

#[derive(Debug)]
struct StreamState {
    start_date: DateTime<Utc>,
    cache: SeenCache,
    cursor: Option<String>,
    subscribers: Vec<mpsc::UnboundedSender<StreamEvent>>,
    /// Filled only until the first `subscribe()`.
    pending: Option<Vec<StreamEvent>>,
}

struct Shared {
    requester: Arc<dyn HttpRequester>,
    adapter: Arc<dyn ResponseAdapter>,
    endpoint: String,
    state: Mutex<StreamState>,
}

/// Polls an endpoint on an interval and emits each newly discovered item
/// once.
///
/// Items dated at or before the moment the stream (re)started are cached but
/// never emitted. Each tick spawns its own poll, so slow responses may
/// overlap; `stop()` only cancels the ticker, never a poll already in flight.
///
/// Must be created and started inside a tokio runtime.
pub struct PollingStream {
    shared: Arc<Shared>,
    interval: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl PollingStream {
    pub fn new(
        requester: Arc<dyn HttpRequester>,
        endpoint: impl Into<String>,
        adapter: Arc<dyn ResponseAdapter>,
        options: StreamOptions,
    ) -> Self {
        let interval = options
            .interval
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| adapter.default_interval());

        let stream = Self {
            shared: Arc::new(Shared {
                requester,
                adapter,
                endpoint: endpoint.into(),
                state: Mutex::new(StreamState {
                    start_date: Utc::now(),
                    cache: SeenCache::default(),
                    cursor: options.cursor,
                    subscribers: Vec::new(),
                    pending: Some(Vec::new()),
                }),
            }),
            interval,
            timer: Mutex::new(None),
        };

        if options.run_on_creation {
            stream.start();
        }
        stream
    }

    /// Receives every event emitted after this call. The first subscriber
    /// also gets whatever was emitted before anyone subscribed, so a stream
    /// started on creation loses nothing from its first poll.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StreamEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.shared.state.lock();
        for event in state.pending.take().into_iter().flatten() {
            let _ = tx.send(event);
        }
        state.subscribers.push(tx);
        rx
    }

    pub fn start(&self) {
        // Held until the new ticker is stored so concurrent starts cannot
        // leave an orphaned ticker behind.
        let mut timer = self.timer.lock();
        if let Some(old) = timer.take() {
            old.abort();
        }
        self.shared.state.lock().start_date = Utc::now();

        tracing::debug!(
            endpoint = %self.shared.endpoint,
            interval_ms = self.interval.as_millis() as u64,
            "Starting stream"
        );

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.poll().await });

        let shared = Arc::clone(&self.shared);
        let period = self.interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let shared = Arc::clone(&shared);
                tokio::spawn(async move { shared.poll().await });
            }
        });

        *timer = Some(handle);
    }

    pub fn stop(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.abort();
            tracing::debug!(endpoint = %self.shared.endpoint, "Stopped stream");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Runs a single poll on the current task.
    pub async fn poll_once(&self) {
        self.shared.poll().await;
    }

    pub fn endpoint(&self) -> &str {
        &self.shared.endpoint
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.shared.state.lock().start_date
    }

    pub fn cursor(&self) -> Option<String> {
        self.shared.state.lock().cursor.clone()
    }

    pub fn cached_ids(&self) -> Vec<String> {
        self.shared.state.lock().cache.order.clone()
    }
}

impl Drop for PollingStream {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    fn request_params(&self) -> Params {
        let mut params = Params::new();
        let cursor = self.state.lock().cursor.clone();
        if let (Some(name), Some(cursor)) = (self.adapter.cursor_param(), cursor) {
            params.insert(name.to_string(), cursor);
        }
        params
    }

    async fn poll(&self) {
        let params = self.request_params();
        let result = self.requester.get(&self.endpoint, &params).await;

        let events = match result
            .map_err(StreamError::from)
            .and_then(|response| Ok(self.adapter.extract(&response)?))
        {
            Ok(page) => self.absorb(page.items, page.next_cursor),
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "Stream poll failed");
                vec![StreamEvent::Error(Arc::new(err))]
            }
        };

        self.emit(events);
    }

    /// Updates the cache and cursor under one lock and returns the messages
    /// to emit, in response order.
    fn absorb(&self, items: Vec<StreamItem>, next_cursor: Option<String>) -> Vec<StreamEvent> {
        if items.is_empty() {
            return Vec::new();
        }

        let mut state = self.state.lock();
        let start_date = state.start_date;

        let fresh: Vec<StreamItem> = items
            .into_iter()
            .filter(|item| state.cache.insert(&item.identity))
            .filter(|item| item.timestamp > start_date)
            .collect();

        if let Some(cursor) = next_cursor {
            tracing::debug!(endpoint = %self.endpoint, %cursor, "Advancing stream cursor");
            state.cursor = Some(cursor);
            state.cache.clear();
        }

        fresh
            .into_iter()
            .map(|item| StreamEvent::Message(item.raw))
            .collect()
    }

    fn emit(&self, events: Vec<StreamEvent>) {
        if events.is_empty() {
            return;
        }

        let subscribers = {
            let mut state = self.state.lock();
            if let Some(pending) = state.pending.as_mut() {
                pending.extend(events);
                let overflow = pending.len().saturating_sub(MAX_PENDING_EVENTS);
                pending.drain(..overflow);
                return;
            }
            state.subscribers.clone()
        };
        let mut closed = false;
        for event in events {
            for tx in &subscribers {
                closed |= tx.send(event.clone()).is_err();
            }
        }

        if closed {
            self.state.lock().subscribers.retain(|tx| !tx.is_closed());
        }
    }
}
