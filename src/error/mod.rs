mod app;
mod config;
mod content;
mod data;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use content::ContentError;
pub use data::DataError;
pub use http::{DispatchError, TransportError};
pub use validation::ValidationError;
