use serde::{Deserialize, Serialize};

/// Payload of an identity token issued by the auth provider. The subject is
/// the verified email address; `name` is the display name to provision a
/// user with on first sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,  // verified email
    pub name: String, // display name
    pub iat: usize,   // issued at (unix timestamp)
    pub exp: usize,   // expires at (unix timestamp)
    pub iss: String,  // issuer
    pub aud: String,  // audience
}
