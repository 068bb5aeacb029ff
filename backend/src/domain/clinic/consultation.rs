//! Consultations (`consultas`) and the filtered history view.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{
    BindParams, CatalogRecord, CatalogService, CrudProcedures, deserialize_optional_datetime,
};
use crate::domain::{Envelope, Error, ProcedureCall, Row, RowDecodeError, read_all};

const HISTORY_PROCEDURE: &str = "procConsultasHistorial";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Consultation {
    pub id: i32,
    #[serde(rename = "idMedico")]
    pub doctor_id: i32,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "sintomas")]
    pub symptoms: Option<String>,
    #[serde(rename = "recomendaciones")]
    pub recommendations: Option<String>,
    #[serde(rename = "diagnostico")]
    pub diagnosis: Option<String>,
    #[serde(rename = "fechaConsulta")]
    pub consulted_at: NaiveDateTime,
}

/// Consultation joined with the doctor's and patient's display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsultationHistory {
    pub id: i32,
    #[serde(rename = "idMedico")]
    pub doctor_id: i32,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "nombreMedico")]
    pub doctor_name: String,
    #[serde(rename = "nombrePaciente")]
    pub patient_name: String,
    #[serde(rename = "sintomas")]
    pub symptoms: Option<String>,
    #[serde(rename = "recomendaciones")]
    pub recommendations: Option<String>,
    #[serde(rename = "diagnostico")]
    pub diagnosis: Option<String>,
    #[serde(rename = "fechaConsulta")]
    pub consulted_at: NaiveDateTime,
}

impl ConsultationHistory {
    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: row.int("Id")?,
            doctor_id: row.int("IdMedico")?,
            patient_id: row.int("IdPaciente")?,
            doctor_name: row.string("NombreMedico")?,
            patient_name: row.string("NombrePaciente")?,
            symptoms: row.opt_string("Sintomas")?,
            recommendations: row.opt_string("Recomendaciones")?,
            diagnosis: row.opt_string("Diagnostico")?,
            consulted_at: row.timestamp("FechaConsulta")?,
        })
    }
}

/// Body for creating or updating a consultation.
///
/// A missing `fechaConsulta` is passed as null; the procedure picks the
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConsultationDraft {
    #[serde(rename = "idMedico")]
    pub doctor_id: i32,
    #[serde(rename = "idPaciente")]
    pub patient_id: i32,
    #[serde(rename = "sintomas", default)]
    pub symptoms: Option<String>,
    #[serde(rename = "recomendaciones", default)]
    pub recommendations: Option<String>,
    #[serde(rename = "diagnostico", default)]
    pub diagnosis: Option<String>,
    #[serde(
        rename = "fechaConsulta",
        default,
        deserialize_with = "deserialize_optional_datetime"
    )]
    pub consulted_at: Option<NaiveDateTime>,
}

impl BindParams for ConsultationDraft {
    fn bind(&self, call: ProcedureCall) -> ProcedureCall {
        call.int("pIdMedico", self.doctor_id)
            .int("pIdPaciente", self.patient_id)
            .text("pSintomas", self.symptoms.as_deref())
            .text("pRecomendaciones", self.recommendations.as_deref())
            .text("pDiagnostico", self.diagnosis.as_deref())
            .timestamp("pFechaConsulta", self.consulted_at)
    }
}

impl CatalogRecord for Consultation {
    type Draft = ConsultationDraft;
    const PROCEDURES: CrudProcedures = CrudProcedures {
        query: "procConsultasCon",
        insert: "procConsultasIns",
        update: "procConsultasUpd",
        delete: "procConsultasDel",
    };

    fn from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: row.int("Id")?,
            doctor_id: row.int("IdMedico")?,
            patient_id: row.int("IdPaciente")?,
            symptoms: row.opt_string("Sintomas")?,
            recommendations: row.opt_string("Recomendaciones")?,
            diagnosis: row.opt_string("Diagnostico")?,
            consulted_at: row.timestamp("FechaConsulta")?,
        })
    }
}

/// Optional filters for the consultation history. Absent values bind null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryFilter {
    #[serde(rename = "idMedico", default)]
    pub doctor_id: Option<i32>,
    #[serde(rename = "idPaciente", default)]
    pub patient_id: Option<i32>,
    /// Inclusive lower bound, e.g. `2024-05-01`.
    #[serde(
        rename = "fechaInicio",
        default,
        deserialize_with = "deserialize_optional_datetime"
    )]
    #[param(value_type = Option<String>)]
    pub from: Option<NaiveDateTime>,
    /// Upper bound, e.g. `2024-05-31T23:59:59`.
    #[serde(
        rename = "fechaFin",
        default,
        deserialize_with = "deserialize_optional_datetime"
    )]
    #[param(value_type = Option<String>)]
    pub to: Option<NaiveDateTime>,
}

pub type ConsultationService = CatalogService<Consultation>;

impl CatalogService<Consultation> {
    /// Consultations matching `filter`, with doctor and patient names.
    pub async fn history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Envelope<Vec<ConsultationHistory>>, Error> {
        let call = ProcedureCall::new(HISTORY_PROCEDURE)
            .int("pIdMedico", filter.doctor_id)
            .int("pIdPaciente", filter.patient_id)
            .timestamp("pFechaInicio", filter.from)
            .timestamp("pFechaFin", filter.to);
        self.gateway()
            .query(call, |cursor| {
                read_all(cursor, ConsultationHistory::from_row).map(Some)
            })
            .await
    }
}
