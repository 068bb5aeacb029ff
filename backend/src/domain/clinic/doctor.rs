//! Doctors (`medicos`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BindParams, CatalogRecord, CatalogService, CrudProcedures};
use crate::domain::{ProcedureCall, Row, RowDecodeError};

/// Doctor as returned by `procCatMedicosCon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Doctor {
    pub id: i32,
    #[serde(rename = "primerNombre")]
    pub first_name: String,
    #[serde(rename = "segundoNombre")]
    pub middle_name: Option<String>,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: Option<String>,
    /// Professional licence number.
    #[serde(rename = "cedula")]
    pub licence: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "especialidad")]
    pub specialty: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: NaiveDateTime,
}

/// Body for creating or updating a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DoctorDraft {
    #[serde(rename = "primerNombre")]
    pub first_name: String,
    #[serde(rename = "segundoNombre", default)]
    pub middle_name: Option<String>,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno", default)]
    pub maternal_surname: Option<String>,
    #[serde(rename = "cedula")]
    pub licence: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "especialidad", default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl BindParams for DoctorDraft {
    fn bind(&self, call: ProcedureCall) -> ProcedureCall {
        call.varchar("pPrimerNombre", Some(self.first_name.as_str()), 100)
            .varchar("pSegundoNombre", self.middle_name.as_deref(), 100)
            .varchar("pApellidoPaterno", Some(self.paternal_surname.as_str()), 100)
            .varchar("pApellidoMaterno", self.maternal_surname.as_deref(), 100)
            .varchar("pCedula", Some(self.licence.as_str()), 50)
            .varchar("pTelefono", self.phone.as_deref(), 20)
            .varchar("pEspecialidad", self.specialty.as_deref(), 200)
            .varchar("pEmail", self.email.as_deref(), 200)
    }
}

impl CatalogRecord for Doctor {
    type Draft = DoctorDraft;
    const PROCEDURES: CrudProcedures = CrudProcedures {
        query: "procCatMedicosCon",
        insert: "procCatMedicosIns",
        update: "procCatMedicosUpd",
        delete: "procCatMedicosDel",
    };

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: row.int("Id")?,
            first_name: row.string("PrimerNombre")?,
            middle_name: row.opt_string("SegundoNombre")?,
            paternal_surname: row.string("ApellidoPaterno")?,
            maternal_surname: row.opt_string("ApellidoMaterno")?,
            licence: row.string("Cedula")?,
            phone: row.opt_string("Telefono")?,
            specialty: row.opt_string("Especialidad")?,
            email: row.opt_string("Email")?,
            active: row.boolean("Activo")?,
            created_at: row.timestamp("FechaCreacion")?,
        })
    }
}

pub type DoctorService = CatalogService<Doctor>;
