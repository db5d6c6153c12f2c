pub mod error;
pub mod models;
pub mod settings;

pub use error::{ConfigError, RequestError};
pub use models::{Params, Provider};
pub use settings::Settings;
