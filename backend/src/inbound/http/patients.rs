//! Patient catalogue handlers under `/api/pacientes`.

use actix_web::{delete, get, post, put, web};

use crate::domain::{Envelope, Patient, PatientDraft, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{EmptyEnvelopeSchema, EnvelopeSchema, FailureEnvelopeSchema};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/pacientes",
    responses(
        (status = 200, description = "Patients", body = EnvelopeSchema<Vec<Patient>>),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 503, description = "Database unavailable", body = FailureEnvelopeSchema)
    ),
    tags = ["pacientes"],
    operation_id = "listPatients"
)]
#[get("/pacientes")]
pub async fn list_patients(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<Patient>>>> {
    state.patients.list().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/pacientes/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = EnvelopeSchema<Patient>),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["pacientes"],
    operation_id = "getPatient"
)]
#[get("/pacientes/{id}")]
pub async fn get_patient(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<Patient>>> {
    state.patients.get(id.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/pacientes",
    request_body = PatientDraft,
    responses(
        (status = 200, description = "Insert outcome with the new id", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["pacientes"],
    operation_id = "createPatient"
)]
#[post("/pacientes")]
pub async fn create_patient(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<PatientDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state.patients.create(&payload).await.map(web::Json)
}

#[utoipa::path(
    put,
    path = "/api/pacientes/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    request_body = PatientDraft,
    responses(
        (status = 200, description = "Update outcome", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["pacientes"],
    operation_id = "updatePatient"
)]
#[put("/pacientes/{id}")]
pub async fn update_patient(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<PatientDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state
        .patients
        .update(id.into_inner(), &payload)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/pacientes/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Delete outcome", body = EmptyEnvelopeSchema),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["pacientes"],
    operation_id = "deletePatient"
)]
#[delete("/pacientes/{id}")]
pub async fn delete_patient(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.patients.delete(id.into_inner()).await.map(web::Json)
}
