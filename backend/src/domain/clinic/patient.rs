//! Patients (`pacientes`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BindParams, CatalogRecord, CatalogService, CrudProcedures};
use crate::domain::{ProcedureCall, Row, RowDecodeError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: i32,
    #[serde(rename = "primerNombre")]
    pub first_name: String,
    #[serde(rename = "segundoNombre")]
    pub middle_name: Option<String>,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientDraft {
    #[serde(rename = "primerNombre")]
    pub first_name: String,
    #[serde(rename = "segundoNombre", default)]
    pub middle_name: Option<String>,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno", default)]
    pub maternal_surname: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

impl BindParams for PatientDraft {
    fn bind(&self, call: ProcedureCall) -> ProcedureCall {
        call.varchar("pPrimerNombre", Some(self.first_name.as_str()), 100)
            .varchar("pSegundoNombre", self.middle_name.as_deref(), 100)
            .varchar("pApellidoPaterno", Some(self.paternal_surname.as_str()), 100)
            .varchar("pApellidoMaterno", self.maternal_surname.as_deref(), 100)
            .varchar("pTelefono", self.phone.as_deref(), 20)
    }
}

impl CatalogRecord for Patient {
    type Draft = PatientDraft;
    const PROCEDURES: CrudProcedures = CrudProcedures {
        query: "procCatPacientesCon",
        insert: "procCatPacientesIns",
        update: "procCatPacientesUpd",
        delete: "procCatPacientesDel",
    };

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: row.int("Id")?,
            first_name: row.string("PrimerNombre")?,
            middle_name: row.opt_string("SegundoNombre")?,
            paternal_surname: row.string("ApellidoPaterno")?,
            maternal_surname: row.opt_string("ApellidoMaterno")?,
            phone: row.opt_string("Telefono")?,
            active: row.boolean("Activo")?,
            created_at: row.timestamp("FechaCreacion")?,
        })
    }
}

pub type PatientService = CatalogService<Patient>;
