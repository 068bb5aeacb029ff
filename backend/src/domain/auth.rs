//! Login flow: credential check through `procAuthLogin` and token issuance.
//!
//! A session is `Unauthenticated -> Authenticated` with nothing in between
//! and no refresh; its lifetime lives entirely in the token's `exp` claim.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::clinic::{CatalogRecord, UserAccount};
use super::ports::{TokenClaims, TokenService};
use super::{Envelope, Error, ProcedureCall, StoredProcedureGateway, read_first};

const LOGIN_PROCEDURE: &str = "procAuthLogin";

/// Validity window of an issued bearer token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 8 * 60 * 60;

/// Login payload values that fail basic shape checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// The email is trimmed; the password is kept verbatim and wiped on drop.
///
/// # Examples
/// ```
/// use clinica_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ana@clinica.mx ", "pw").unwrap();
/// assert_eq!(creds.email(), "ana@clinica.mx");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload: `{ token, usuario }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthSession {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: UserAccount,
}

/// Authenticates credentials and mints bearer tokens.
#[derive(Clone)]
pub struct LoginService {
    gateway: StoredProcedureGateway,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl LoginService {
    pub fn new(
        gateway: StoredProcedureGateway,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            tokens,
            clock,
        }
    }

    /// Run the login procedure and issue a token for an active account.
    ///
    /// The procedure's output flag is checked first: a failed call is
    /// rejected even when it also returned an account row.
    ///
    /// # Errors
    /// - [`Error::unauthorized`] when the procedure reports failure or no
    ///   account row comes back.
    /// - [`Error::forbidden`] when the account is inactive.
    /// - Gateway and signing failures as internal or unavailable errors.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Envelope<AuthSession>, Error> {
        let messages = self.gateway.messages();
        let call = ProcedureCall::new(LOGIN_PROCEDURE)
            .varchar("pCorreo", Some(credentials.email()), 200)
            .secret_varchar("pPassword", credentials.password(), 500);
        let envelope = self
            .gateway
            .query(call, |cursor| read_first(cursor, UserAccount::from_row))
            .await?;
        if !envelope.success() {
            info!("login rejected: procedure reported failure");
            return Err(Error::unauthorized(messages.credentials_incorrect));
        }
        let message = envelope.message().to_owned();

        let Some(user) = envelope.into_data() else {
            info!("login rejected: credentials incorrect");
            return Err(Error::unauthorized(messages.credentials_incorrect));
        };
        if !user.active {
            info!(user_id = user.id, "login rejected: account inactive");
            return Err(Error::forbidden(messages.account_inactive));
        }

        let claims = self.claims_for(&user);
        let token = self.tokens.issue(&claims).map_err(|err| {
            warn!(error = %err, "token signing failed");
            Error::internal(err.to_string())
        })?;
        info!(user_id = user.id, jti = %claims.jti, "login succeeded");
        Ok(Envelope::ok(message, AuthSession { token, user }))
    }

    fn claims_for(&self, user: &UserAccount) -> TokenClaims {
        let issued_at = self.clock.utc().timestamp();
        TokenClaims {
            sub: user.id.to_string(),
            name: user.full_name.clone(),
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            doctor_id: user.doctor_id,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
            iss: None,
            aud: None,
        }
    }
}
