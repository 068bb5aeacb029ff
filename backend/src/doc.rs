//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health checks, the domain
//! record schemas and the HTTP bearer security scheme. The document backs
//! Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use crate::domain::{
    AuthSession, Consultation, ConsultationDraft, ConsultationHistory, Doctor, DoctorDraft,
    Patient, PatientDraft, RecordId, UserAccount, UserAccountDraft,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::schemas::{EmptyEnvelopeSchema, FailureEnvelopeSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Clinic backend API",
        description = "Stored-procedure backed catalogues for doctors, patients, user accounts and consultations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::doctors::list_doctors,
        crate::inbound::http::doctors::get_doctor,
        crate::inbound::http::doctors::create_doctor,
        crate::inbound::http::doctors::update_doctor,
        crate::inbound::http::doctors::delete_doctor,
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::user_accounts::list_user_accounts,
        crate::inbound::http::user_accounts::get_user_account,
        crate::inbound::http::user_accounts::create_user_account,
        crate::inbound::http::user_accounts::update_user_account,
        crate::inbound::http::user_accounts::delete_user_account,
        crate::inbound::http::consultations::consultation_history,
        crate::inbound::http::consultations::list_consultations,
        crate::inbound::http::consultations::get_consultation,
        crate::inbound::http::consultations::create_consultation,
        crate::inbound::http::consultations::update_consultation,
        crate::inbound::http::consultations::delete_consultation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Doctor,
        DoctorDraft,
        Patient,
        PatientDraft,
        UserAccount,
        UserAccountDraft,
        Consultation,
        ConsultationDraft,
        ConsultationHistory,
        RecordId,
        AuthSession,
        LoginRequest,
        EmptyEnvelopeSchema,
        FailureEnvelopeSchema,
    )),
    tags(
        (name = "auth", description = "Login and bearer token issuance"),
        (name = "medicos", description = "Doctor catalogue"),
        (name = "pacientes", description = "Patient catalogue"),
        (name = "usuarios", description = "User account catalogue"),
        (name = "consultas", description = "Consultations and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
