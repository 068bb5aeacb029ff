//! Port for minting and verifying signed bearer tokens.

use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or verifying bearer tokens.
    pub enum TokenError {
        /// Claims could not be encoded or signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is not a well-formed JWT for this service.
        Malformed { message: String } => "malformed token: {message}",
        /// Signature verification failed.
        BadSignature => "token signature is invalid",
        /// The token is past its expiry, beyond the allowed leeway.
        Expired => "token has expired",
        /// Issuer claim does not match the configured issuer.
        IssuerMismatch => "token issuer is not accepted",
        /// Audience claim does not match the configured audience.
        AudienceMismatch => "token audience is not accepted",
    }
}

/// Identity claims carried by a bearer token.
///
/// `iss` and `aud` are stamped by the signing adapter when configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub jti: String,
    #[serde(rename = "idMedico", default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i32>,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign `claims`, returning the compact token.
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify a compact token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
