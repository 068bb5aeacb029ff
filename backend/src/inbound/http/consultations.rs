//! Consultation handlers under `/api/consultas`.
//!
//! `GET /api/consultas/historial` is registered ahead of
//! `GET /api/consultas/{id}` so the literal segment wins.

use actix_web::{delete, get, post, put, web};

use crate::domain::{
    Consultation, ConsultationDraft, ConsultationHistory, Envelope, HistoryFilter, RecordId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{EmptyEnvelopeSchema, EnvelopeSchema, FailureEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Consultation history joined with doctor and patient names.
///
/// Every filter is optional; dates accept `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`
/// or RFC 3339.
#[utoipa::path(
    get,
    path = "/api/consultas/historial",
    params(HistoryFilter),
    responses(
        (status = 200, description = "Consultation history", body = EnvelopeSchema<Vec<ConsultationHistory>>),
        (status = 400, description = "Invalid filter", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "consultationHistory"
)]
#[get("/consultas/historial")]
pub async fn consultation_history(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    filter: web::Query<HistoryFilter>,
) -> ApiResult<web::Json<Envelope<Vec<ConsultationHistory>>>> {
    state.consultations.history(&filter).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/consultas",
    responses(
        (status = 200, description = "Consultations", body = EnvelopeSchema<Vec<Consultation>>),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 503, description = "Database unavailable", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "listConsultations"
)]
#[get("/consultas")]
pub async fn list_consultations(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<Consultation>>>> {
    state.consultations.list().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/consultas/{id}",
    params(("id" = i32, Path, description = "Consultation id")),
    responses(
        (status = 200, description = "Consultation", body = EnvelopeSchema<Consultation>),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "getConsultation"
)]
#[get("/consultas/{id}")]
pub async fn get_consultation(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<Consultation>>> {
    state.consultations.get(id.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/consultas",
    request_body = ConsultationDraft,
    responses(
        (status = 200, description = "Insert outcome with the new id", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "createConsultation"
)]
#[post("/consultas")]
pub async fn create_consultation(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<ConsultationDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state.consultations.create(&payload).await.map(web::Json)
}

#[utoipa::path(
    put,
    path = "/api/consultas/{id}",
    params(("id" = i32, Path, description = "Consultation id")),
    request_body = ConsultationDraft,
    responses(
        (status = 200, description = "Update outcome", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "updateConsultation"
)]
#[put("/consultas/{id}")]
pub async fn update_consultation(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<ConsultationDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state
        .consultations
        .update(id.into_inner(), &payload)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/consultas/{id}",
    params(("id" = i32, Path, description = "Consultation id")),
    responses(
        (status = 200, description = "Delete outcome", body = EmptyEnvelopeSchema),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["consultas"],
    operation_id = "deleteConsultation"
)]
#[delete("/consultas/{id}")]
pub async fn delete_consultation(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.consultations.delete(id.into_inner()).await.map(web::Json)
}
