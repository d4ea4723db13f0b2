//! API key token generation

mod generator;

pub use generator::KeyTokenGenerator;
