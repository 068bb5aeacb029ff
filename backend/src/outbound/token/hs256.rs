//! Compact HS256 JSON Web Tokens.
//!
//! Tokens are `base64url(header).base64url(claims).base64url(hmac)`, with the
//! header fixed to `{"alg":"HS256","typ":"JWT"}`. Verification recomputes the
//! MAC in constant time before any claim is trusted.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenClaims, TokenError, TokenService};

type HmacSha256 = Hmac<Sha256>;

/// Clock skew tolerated when checking `exp`.
pub const DEFAULT_LEEWAY_SECS: i64 = 60;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// HMAC-SHA256 token signer and verifier.
#[derive(Clone)]
pub struct Hs256TokenService {
    key: Arc<Zeroizing<Vec<u8>>>,
    issuer: Option<String>,
    audience: Option<String>,
    leeway_secs: i64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Hs256TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256TokenService")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

impl Hs256TokenService {
    pub fn new(key: Zeroizing<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: Arc::new(key),
            issuer: None,
            audience: None,
            leeway_secs: DEFAULT_LEEWAY_SECS,
            clock,
        }
    }

    /// Stamp and require `iss`. Blank values disable the check.
    #[must_use]
    pub fn with_issuer(mut self, issuer: Option<String>) -> Self {
        self.issuer = issuer.filter(|value| !value.trim().is_empty());
        self
    }

    /// Stamp and require `aud`. Blank values disable the check.
    #[must_use]
    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience.filter(|value| !value.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_leeway_secs(mut self, leeway_secs: i64) -> Self {
        self.leeway_secs = leeway_secs.max(0);
        self
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.key.as_slice())
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn signature(&self, signing_input: &str) -> Result<String, TokenError> {
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    fn check_signature(&self, signing_input: &str, signature: &str) -> Result<(), TokenError> {
        let provided = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::BadSignature)?;
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&provided)
            .map_err(|_| TokenError::BadSignature)
    }

    fn check_claims(&self, claims: &TokenClaims) -> Result<(), TokenError> {
        let now = self.clock.utc().timestamp();
        if claims.exp.saturating_add(self.leeway_secs) < now {
            return Err(TokenError::Expired);
        }
        if !matches_expected(self.issuer.as_deref(), claims.iss.as_deref()) {
            return Err(TokenError::IssuerMismatch);
        }
        if !matches_expected(self.audience.as_deref(), claims.aud.as_deref()) {
            return Err(TokenError::AudienceMismatch);
        }
        Ok(())
    }
}

fn matches_expected(expected: Option<&str>, actual: Option<&str>) -> bool {
    expected.is_none_or(|expected| actual == Some(expected))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|err| TokenError::signing(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str, what: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::malformed(format!("{what} is not base64url")))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| TokenError::malformed(format!("{what} is not valid JSON: {err}")))
}

impl TokenService for Hs256TokenService {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let mut claims = claims.clone();
        if let Some(issuer) = &self.issuer {
            claims.iss = Some(issuer.clone());
        }
        if let Some(audience) = &self.audience {
            claims.aud = Some(audience.clone());
        }

        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: TOKEN_TYPE.to_owned(),
        };
        let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);
        let signature = self.signature(&signing_input)?;
        Ok(format!("{signing_input}.{signature}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::malformed("expected three segments"));
        };

        let header: Header = decode_segment(header, "header")?;
        if header.alg != ALGORITHM {
            return Err(TokenError::malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signing_input_len = token.len() - signature.len() - 1;
        self.check_signature(&token[..signing_input_len], signature)?;

        let claims: TokenClaims = decode_segment(payload, "claims")?;
        self.check_claims(&claims)?;
        Ok(claims)
    }
}
