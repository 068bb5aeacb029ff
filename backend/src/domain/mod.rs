//! Domain layer: result envelope, stored-procedure gateway and the clinic
//! catalogues built on top of it.
//!
//! Public surface:
//! - `Envelope`: uniform `{ value, message, data }` response wrapper.
//! - `ProcedureCall` / `StoredProcedureGateway`: generic procedure invocation.
//! - `Row` / `RowCursor`: tabular results consumed by entity decoders.
//! - `clinic`: doctors, patients, user accounts and consultations.
//! - `LoginService`: credential check and bearer token issuance.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

pub mod auth;
pub mod clinic;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod procedure;
pub mod row;
pub mod trace_id;

pub use self::auth::{
    AuthSession, LoginCredentials, LoginService, LoginValidationError, TOKEN_LIFETIME_SECS,
};
pub use self::clinic::{
    CatalogRecord, CatalogService, Consultation, ConsultationDraft, ConsultationHistory,
    ConsultationService, Doctor, DoctorDraft, DoctorService, HistoryFilter, Patient,
    PatientDraft, PatientService, RecordId, UserAccount, UserAccountDraft, UserAccountService,
    parse_datetime,
};
pub use self::envelope::{Envelope, MessageCatalog, MessageLocale, UnknownLocale};
pub use self::error::{Error, ErrorCode};
pub use self::gateway::StoredProcedureGateway;
pub use self::procedure::{
    ExecutionMode, OutputStatus, ParamValue, ProcedureCall, ProcedureCallError, ProcedureParam,
};
pub use self::row::{ColumnValue, Row, RowCursor, RowDecodeError, read_all, read_first};
pub use self::trace_id::TraceId;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
