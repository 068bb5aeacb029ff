//! Doctor catalogue handlers.
//!
//! ```text
//! GET    /api/medicos
//! GET    /api/medicos/{id}
//! POST   /api/medicos        {"primerNombre":"Luis","apellidoPaterno":"Mora","cedula":"C-1"}
//! PUT    /api/medicos/{id}
//! DELETE /api/medicos/{id}
//! ```

use actix_web::{delete, get, post, put, web};

use crate::domain::{Doctor, DoctorDraft, Envelope, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{EmptyEnvelopeSchema, EnvelopeSchema, FailureEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// List every doctor.
#[utoipa::path(
    get,
    path = "/api/medicos",
    responses(
        (status = 200, description = "Doctors", body = EnvelopeSchema<Vec<Doctor>>),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 503, description = "Database unavailable", body = FailureEnvelopeSchema)
    ),
    tags = ["medicos"],
    operation_id = "listDoctors"
)]
#[get("/medicos")]
pub async fn list_doctors(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<Doctor>>>> {
    state.doctors.list().await.map(web::Json)
}

/// Fetch one doctor; `data` is null when the id is unknown.
#[utoipa::path(
    get,
    path = "/api/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor", body = EnvelopeSchema<Doctor>),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["medicos"],
    operation_id = "getDoctor"
)]
#[get("/medicos/{id}")]
pub async fn get_doctor(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<Doctor>>> {
    state.doctors.get(id.into_inner()).await.map(web::Json)
}

/// Register a doctor.
#[utoipa::path(
    post,
    path = "/api/medicos",
    request_body = DoctorDraft,
    responses(
        (status = 200, description = "Insert outcome with the new id", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["medicos"],
    operation_id = "createDoctor"
)]
#[post("/medicos")]
pub async fn create_doctor(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<DoctorDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state.doctors.create(&payload).await.map(web::Json)
}

/// Replace a doctor's details.
#[utoipa::path(
    put,
    path = "/api/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor id")),
    request_body = DoctorDraft,
    responses(
        (status = 200, description = "Update outcome", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["medicos"],
    operation_id = "updateDoctor"
)]
#[put("/medicos/{id}")]
pub async fn update_doctor(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<DoctorDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state
        .doctors
        .update(id.into_inner(), &payload)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/medicos/{id}",
    params(("id" = i32, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Delete outcome", body = EmptyEnvelopeSchema),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["medicos"],
    operation_id = "deleteDoctor"
)]
#[delete("/medicos/{id}")]
pub async fn delete_doctor(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.doctors.delete(id.into_inner()).await.map(web::Json)
}
