//! Infrastructure layer - Storage backends, identity and services

pub mod account;
pub mod api_key;
pub mod auth;
pub mod logging;
pub mod services;
pub mod storage;
