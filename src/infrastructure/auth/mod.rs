//! Identity token handling

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
