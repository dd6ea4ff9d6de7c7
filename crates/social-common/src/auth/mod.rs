//! Identity-provider session tokens

mod jwt;

pub use jwt::{Claims, JwtService};
