//! Bearer token extractor guarding protected routes.
//!
//! Handlers that take [`Authenticated`] only run once the `Authorization:
//! Bearer <token>` header carries a token the configured [`TokenService`]
//! accepts. Anything else is rejected with `401` before the handler body.
//!
//! [`TokenService`]: crate::domain::ports::TokenService

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::Error;
use crate::domain::ports::TokenClaims;

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Verified identity of the caller.
#[derive(Debug, Clone)]
pub struct Authenticated(TokenClaims);

impl Authenticated {
    pub fn claims(&self) -> &TokenClaims {
        &self.0
    }

    pub fn into_claims(self) -> TokenClaims {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data");
        return Err(Error::internal("authentication is not configured"));
    };
    let token = bearer_token(req).ok_or_else(|| Error::unauthorized("bearer token required"))?;
    state.tokens.verify(token).map(Authenticated).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::unauthorized("invalid bearer token")
    })
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
