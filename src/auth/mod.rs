mod claims;
pub mod jwt;

pub use claims::IdentityClaims;
pub use jwt::{AuthIdentity, JwtKeys};
