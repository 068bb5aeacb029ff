//! User accounts (`usuarios`).

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroize;

use super::{BindParams, CatalogRecord, CatalogService, CrudProcedures};
use crate::domain::{ProcedureCall, Row, RowDecodeError};

/// Account as returned by `procCatUsuariosCon` and `procAuthLogin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserAccount {
    pub id: i32,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    /// Doctor linked to this account, if any.
    #[serde(rename = "idMedico")]
    pub doctor_id: Option<i32>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: NaiveDateTime,
}

/// Body for creating or updating an account. The password is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserAccountDraft {
    #[serde(rename = "correo")]
    pub email: String,
    pub password: String,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "idMedico", default)]
    pub doctor_id: Option<i32>,
}

impl fmt::Debug for UserAccountDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccountDraft")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("doctor_id", &self.doctor_id)
            .finish()
    }
}

impl Drop for UserAccountDraft {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl BindParams for UserAccountDraft {
    fn bind(&self, call: ProcedureCall) -> ProcedureCall {
        call.varchar("pCorreo", Some(self.email.as_str()), 200)
            .secret_varchar("pPassword", &self.password, 500)
            .varchar("pNombreCompleto", Some(self.full_name.as_str()), 300)
            .int("pIdMedico", self.doctor_id)
    }
}

impl CatalogRecord for UserAccount {
    type Draft = UserAccountDraft;
    const PROCEDURES: CrudProcedures = CrudProcedures {
        query: "procCatUsuariosCon",
        insert: "procCatUsuariosIns",
        update: "procCatUsuariosUpd",
        delete: "procCatUsuariosDel",
    };

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: row.int("Id")?,
            email: row.string("Correo")?,
            full_name: row.string("NombreCompleto")?,
            doctor_id: row.opt_int("IdMedico")?,
            active: row.boolean("Activo")?,
            created_at: row.timestamp("FechaCreacion")?,
        })
    }
}

pub type UserAccountService = CatalogService<UserAccount>;
