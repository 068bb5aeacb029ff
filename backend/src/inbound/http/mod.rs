//! HTTP inbound adapter exposing the clinic REST endpoints.

pub mod auth;
pub mod bearer;
pub mod consultations;
pub mod doctors;
pub mod error;
pub mod health;
pub mod jwt_config;
pub mod patients;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod user_accounts;

pub use error::ApiResult;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web;

use self::error::extractor_rejection;

/// Mount the `/api` scope and envelope-shaped extractor rejections.
///
/// Expects a `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use clinica_backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(extractor_rejection::<JsonPayloadError>("body")),
    )
    .app_data(
        web::QueryConfig::default().error_handler(extractor_rejection::<QueryPayloadError>("query")),
    )
    .app_data(web::PathConfig::default().error_handler(extractor_rejection::<PathError>("path")))
    .service(
        web::scope("/api")
            .service(auth::login)
            .service(doctors::list_doctors)
            .service(doctors::get_doctor)
            .service(doctors::create_doctor)
            .service(doctors::update_doctor)
            .service(doctors::delete_doctor)
            .service(patients::list_patients)
            .service(patients::get_patient)
            .service(patients::create_patient)
            .service(patients::update_patient)
            .service(patients::delete_patient)
            .service(user_accounts::list_user_accounts)
            .service(user_accounts::get_user_account)
            .service(user_accounts::create_user_account)
            .service(user_accounts::update_user_account)
            .service(user_accounts::delete_user_account)
            // Registered before `/consultas/{id}` so the literal segment wins.
            .service(consultations::consultation_history)
            .service(consultations::list_consultations)
            .service(consultations::get_consultation)
            .service(consultations::create_consultation)
            .service(consultations::update_consultation)
            .service(consultations::delete_consultation),
    );
}
