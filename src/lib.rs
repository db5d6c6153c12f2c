//! Clients for the Facebook, Instagram, Tumblr, Twitter and Github REST APIs,
//! plus polling streams that emit only newly published items.
//!
//! ```no_run
//! use social_api::core::settings::InstagramSettings;
//! use social_api::providers::Instagram;
//! use social_api::stream::{StreamEvent, StreamOptions};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let instagram = Instagram::new(&InstagramSettings {
//!     client_id: Some("client-id".into()),
//!     access_token: Some("access-token".into()),
//!     ..Default::default()
//! })?;
//!
//! let stream = instagram.stream("tags/sunset/media/recent", StreamOptions::default());
//! let mut events = stream.subscribe();
//! while let Some(event) = events.recv().await {
//!     match event {
//!         StreamEvent::Message(media) => println!("{media}"),
//!         StreamEvent::Error(err) => eprintln!("{err}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod providers;
pub mod stream;
