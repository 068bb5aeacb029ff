//! Clinic catalogue records and the services exposing their procedures.
//!
//! Each catalogue (doctors, patients, user accounts, consultations) follows
//! the same shape: a query procedure taking an optional `pId`, insert and
//! update procedures returning the affected id in their first column, and a
//! delete procedure run as a non-query.

mod consultation;
mod datetime;
mod doctor;
mod patient;
mod user_account;

pub use consultation::{
    Consultation, ConsultationDraft, ConsultationHistory, ConsultationService, HistoryFilter,
};
pub use datetime::{deserialize_optional_datetime, parse_datetime};
pub use doctor::{Doctor, DoctorDraft, DoctorService};
pub use patient::{Patient, PatientDraft, PatientService};
pub use user_account::{UserAccount, UserAccountDraft, UserAccountService};

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    Envelope, Error, ProcedureCall, Row, RowCursor, RowDecodeError, StoredProcedureGateway,
    read_all, read_first,
};

/// Procedure names backing one catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudProcedures {
    pub query: &'static str,
    pub insert: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Identifier returned by insert and update procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordId {
    pub id: i32,
}

impl RecordId {
    /// Read the first column of the first row, if the procedure returned one.
    pub fn from_cursor(cursor: &mut RowCursor) -> Result<Option<Self>, RowDecodeError> {
        read_first(cursor, |row| row.leading_int().map(|id| Self { id }))
    }
}

/// Request payload that binds itself as procedure inputs.
pub trait BindParams {
    fn bind(&self, call: ProcedureCall) -> ProcedureCall;
}

/// A record managed through a [`CrudProcedures`] set.
pub trait CatalogRecord: Sized {
    type Draft: BindParams;
    const PROCEDURES: CrudProcedures;

    fn from_row(row: &Row) -> Result<Self, RowDecodeError>;
}

/// List, fetch, create, update and delete for one catalogue.
pub struct CatalogService<R> {
    gateway: StoredProcedureGateway,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: CatalogRecord> CatalogService<R> {
    pub fn new(gateway: StoredProcedureGateway) -> Self {
        Self {
            gateway,
            _record: PhantomData,
        }
    }

    pub(crate) fn gateway(&self) -> &StoredProcedureGateway {
        &self.gateway
    }

    /// All records: the query procedure with a null `pId`.
    pub async fn list(&self) -> Result<Envelope<Vec<R>>, Error> {
        let call = ProcedureCall::new(R::PROCEDURES.query).int("pId", None::<i32>);
        self.gateway
            .query(call, |cursor| read_all(cursor, R::from_row).map(Some))
            .await
    }

    /// One record by id; `data` is null when the procedure returns no row.
    pub async fn get(&self, id: i32) -> Result<Envelope<R>, Error> {
        let call = ProcedureCall::new(R::PROCEDURES.query).int("pId", id);
        self.gateway
            .query(call, |cursor| read_first(cursor, R::from_row))
            .await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<Envelope<RecordId>, Error> {
        let call = draft.bind(ProcedureCall::new(R::PROCEDURES.insert));
        self.gateway.query(call, RecordId::from_cursor).await
    }

    pub async fn update(&self, id: i32, draft: &R::Draft) -> Result<Envelope<RecordId>, Error> {
        let call = draft.bind(ProcedureCall::new(R::PROCEDURES.update).int("pId", id));
        self.gateway.query(call, RecordId::from_cursor).await
    }

    pub async fn delete(&self, id: i32) -> Result<Envelope<()>, Error> {
        let call = ProcedureCall::new(R::PROCEDURES.delete).int("pId", id);
        self.gateway.execute(call).await
    }
}
