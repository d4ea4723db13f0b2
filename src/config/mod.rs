//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, LedgerConfig, LogFormat, LoggingConfig, ServerConfig, StorageSettings,
};
