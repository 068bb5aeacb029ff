//! User account catalogue handlers under `/api/usuarios`.
//!
//! Passwords are accepted on create and update and never echoed back.

use actix_web::{delete, get, post, put, web};

use crate::domain::{Envelope, RecordId, UserAccount, UserAccountDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{EmptyEnvelopeSchema, EnvelopeSchema, FailureEnvelopeSchema};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/usuarios",
    responses(
        (status = 200, description = "User accounts", body = EnvelopeSchema<Vec<UserAccount>>),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema),
        (status = 503, description = "Database unavailable", body = FailureEnvelopeSchema)
    ),
    tags = ["usuarios"],
    operation_id = "listUserAccounts"
)]
#[get("/usuarios")]
pub async fn list_user_accounts(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<UserAccount>>>> {
    state.user_accounts.list().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "User account id")),
    responses(
        (status = 200, description = "User account", body = EnvelopeSchema<UserAccount>),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["usuarios"],
    operation_id = "getUserAccount"
)]
#[get("/usuarios/{id}")]
pub async fn get_user_account(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<UserAccount>>> {
    state.user_accounts.get(id.into_inner()).await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = UserAccountDraft,
    responses(
        (status = 200, description = "Insert outcome with the new id", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["usuarios"],
    operation_id = "createUserAccount"
)]
#[post("/usuarios")]
pub async fn create_user_account(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    payload: web::Json<UserAccountDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state.user_accounts.create(&payload).await.map(web::Json)
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "User account id")),
    request_body = UserAccountDraft,
    responses(
        (status = 200, description = "Update outcome", body = EnvelopeSchema<RecordId>),
        (status = 400, description = "Invalid request", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["usuarios"],
    operation_id = "updateUserAccount"
)]
#[put("/usuarios/{id}")]
pub async fn update_user_account(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<UserAccountDraft>,
) -> ApiResult<web::Json<Envelope<RecordId>>> {
    state
        .user_accounts
        .update(id.into_inner(), &payload)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "User account id")),
    responses(
        (status = 200, description = "Delete outcome", body = EmptyEnvelopeSchema),
        (status = 400, description = "Invalid id", body = FailureEnvelopeSchema),
        (status = 401, description = "Bearer token missing or invalid", body = FailureEnvelopeSchema),
        (status = 500, description = "Internal server error", body = FailureEnvelopeSchema)
    ),
    tags = ["usuarios"],
    operation_id = "deleteUserAccount"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user_account(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Envelope<()>>> {
    state.user_accounts.delete(id.into_inner()).await.map(web::Json)
}
