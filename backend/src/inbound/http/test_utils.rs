//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use zeroize::Zeroizing;

use crate::domain::ports::{
    MockProcedureExecutor, ProcedureOutcome, TokenClaims, TokenService,
};
use crate::domain::{
    MessageLocale, OutputStatus, Row, RowCursor, StoredProcedureGateway, TOKEN_LIFETIME_SECS,
};
use crate::outbound::token::Hs256TokenService;

use super::state::HttpState;

const TEST_KEY: &[u8] = b"test-signing-key-of-32-bytes-min";

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn fixture_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid fixture timestamp")
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock(fixture_now()))
}

/// Token service with a fixed key and clock.
pub fn token_service() -> Arc<dyn TokenService> {
    Arc::new(Hs256TokenService::new(
        Zeroizing::new(TEST_KEY.to_vec()),
        fixture_clock(),
    ))
}

pub fn state_with(executor: MockProcedureExecutor) -> HttpState {
    let gateway = StoredProcedureGateway::new(Arc::new(executor), MessageLocale::En);
    HttpState::new(gateway, token_service(), fixture_clock())
}

/// State whose executor fails the test if any procedure is invoked.
pub fn unused_executor_state() -> HttpState {
    let mut executor = MockProcedureExecutor::new();
    executor.expect_execute().never();
    state_with(executor)
}

pub fn claims_for(user_id: i32, email: &str) -> TokenClaims {
    let iat = fixture_now().timestamp();
    TokenClaims {
        sub: user_id.to_string(),
        name: "Test User".to_owned(),
        email: email.to_owned(),
        jti: "5f0c4f8e-8d0e-4c53-9b6b-2b1f3f0a1c2d".to_owned(),
        doctor_id: None,
        iat,
        exp: iat + TOKEN_LIFETIME_SECS,
        iss: None,
        aud: None,
    }
}

/// `Authorization` header value carrying a token minted by `state`.
pub fn bearer_header(state: &HttpState, claims: &TokenClaims) -> String {
    let token = state.tokens.issue(claims).expect("token issued");
    format!("Bearer {token}")
}

pub fn outcome(success: bool, message: Option<&str>, rows: Vec<Row>) -> ProcedureOutcome {
    ProcedureOutcome::new(
        OutputStatus::new(success, message.map(str::to_owned)),
        RowCursor::from(rows),
    )
}

/// Application with the `/api` routes and extractor configuration mounted.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure_api)
}
