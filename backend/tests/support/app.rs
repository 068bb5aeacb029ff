//! HTTP state and request helpers shared by the clinic suites.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use clinica_backend::Trace;
use clinica_backend::domain::{MessageLocale, StoredProcedureGateway};
use clinica_backend::inbound::http::configure_api;
use clinica_backend::inbound::http::state::HttpState;
use clinica_backend::outbound::token::Hs256TokenService;
use mockable::{Clock, DefaultClock};
use zeroize::Zeroizing;

use super::db::{Account, InMemoryClinic};

pub(crate) const DOCTOR_EMAIL: &str = "ana@clinica.test";
pub(crate) const DOCTOR_PASSWORD: &str = "s3cret";
pub(crate) const RETIRED_EMAIL: &str = "luis@clinica.test";
pub(crate) const RETIRED_PASSWORD: &str = "old-pass";

/// Clinic seeded with one active and one inactive account.
pub(crate) fn seeded_clinic() -> Arc<InMemoryClinic> {
    let clinic = InMemoryClinic::new();
    clinic.add_account(Account {
        id: 1,
        email: DOCTOR_EMAIL.to_owned(),
        password: DOCTOR_PASSWORD.to_owned(),
        full_name: "Ana Torres".to_owned(),
        doctor_id: Some(7),
        active: true,
    });
    clinic.add_account(Account {
        id: 2,
        email: RETIRED_EMAIL.to_owned(),
        password: RETIRED_PASSWORD.to_owned(),
        full_name: "Luis Medina".to_owned(),
        doctor_id: None,
        active: false,
    });
    Arc::new(clinic)
}

pub(crate) fn http_state(clinic: Arc<InMemoryClinic>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let gateway = StoredProcedureGateway::new(clinic, MessageLocale::En);
    let tokens = Hs256TokenService::new(Zeroizing::new(vec![42_u8; 32]), Arc::clone(&clock))
        .with_issuer(Some("clinica".to_owned()));
    HttpState::new(gateway, Arc::new(tokens), clock)
}

/// Application with the trace middleware and the full API mounted.
pub(crate) fn clinic_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}
