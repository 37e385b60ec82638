//! Shared domain model and configuration for the search-suggestion
//! aggregator.
//!
//! Nothing in this crate touches the network: it defines the normalized
//! [`Suggestion`] record every source is converted into, the ordered
//! [`SuggestionList`] a query cycle produces, and the environment-driven
//! [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod suggestion;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use suggestion::{QueryContext, Suggestion, SuggestionKind, SuggestionList};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
