mod adapter;
mod polling;
#[cfg(test)]
mod testing;

pub use adapter::{
    AdapterError, FacebookAdapter, InstagramAdapter, Page, ResponseAdapter, StreamItem,
    TumblrAdapter,
};
pub use polling::{PollingStream, StreamError, StreamEvent, StreamOptions};
