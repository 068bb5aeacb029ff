//! Login handler.
//!
//! ```text
//! POST /api/auth/login {"correo":"ana@clinica.mx","password":"secreto"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroize;

use crate::domain::{AuthSession, Envelope, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EnvelopeSchema, FailureEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@clinica.mx")]
    pub correo: String,
    pub password: String,
}

impl Drop for LoginRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.correo, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("correo must not be empty")
            .with_details(json!({ "field": "correo", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Authenticate an account and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = EnvelopeSchema<AuthSession>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Incorrect credentials", body = FailureEnvelopeSchema),
        (status = 403, description = "Account inactive", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 503, description = "Database unavailable", body = FailureEnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Envelope<AuthSession>>> {
    let credentials =
        LoginCredentials::try_from(&*payload).map_err(map_login_validation_error)?;
    drop(payload);
    state.login.login(&credentials).await.map(web::Json)
}
