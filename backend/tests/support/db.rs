//! In-memory stand-in for the clinic database.
//!
//! Emulates the doctor catalogue procedures and `procAuthLogin` closely
//! enough to drive the HTTP surface end to end.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use clinica_backend::domain::ports::{
    ProcedureExecutor, ProcedureExecutorError, ProcedureOutcome,
};
use clinica_backend::domain::{
    ColumnValue, ExecutionMode, OutputStatus, ParamValue, ProcedureCall, Row, RowCursor,
};

pub(crate) fn created_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid fixture timestamp")
}

#[derive(Debug, Clone)]
pub(crate) struct Account {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub doctor_id: Option<i32>,
    pub active: bool,
}

#[derive(Default)]
struct Tables {
    doctors: BTreeMap<i32, Vec<(String, ColumnValue)>>,
    next_doctor_id: i32,
    accounts: Vec<Account>,
    offline: bool,
}

/// Procedure executor backed by in-process tables.
#[derive(Default)]
pub(crate) struct InMemoryClinic {
    tables: Mutex<Tables>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryClinic {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_account(&self, account: Account) {
        self.tables
            .lock()
            .expect("tables lock")
            .accounts
            .push(account);
    }

    /// Make every subsequent call fail as if the server were unreachable.
    pub(crate) fn go_offline(&self) {
        self.tables.lock().expect("tables lock").offline = true;
    }

    /// Names of the procedures invoked so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn run(&self, call: &ProcedureCall) -> Result<ProcedureOutcome, ProcedureExecutorError> {
        let mut tables = self.tables.lock().expect("tables lock");
        if tables.offline {
            return Err(ProcedureExecutorError::connection("connection refused"));
        }
        let outcome = match call.name() {
            "procCatMedicosIns" => insert_doctor(&mut tables, call),
            "procCatMedicosCon" => query_doctors(&tables, call),
            "procCatMedicosDel" => delete_doctor(&mut tables, call),
            "procAuthLogin" => login(&tables, call),
            other => ProcedureOutcome::new(
                OutputStatus::new(false, Some(format!("{other} is not available"))),
                RowCursor::empty(),
            ),
        };
        Ok(outcome)
    }
}

#[async_trait]
impl ProcedureExecutor for InMemoryClinic {
    async fn execute(
        &self,
        call: &ProcedureCall,
        mode: ExecutionMode,
    ) -> Result<ProcedureOutcome, ProcedureExecutorError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(call.name().to_owned());
        let mut outcome = self.run(call)?;
        if mode == ExecutionMode::NonQuery {
            outcome.rows = RowCursor::empty();
        }
        Ok(outcome)
    }
}

fn param<'a>(call: &'a ProcedureCall, name: &str) -> Option<&'a ParamValue> {
    call.params()
        .iter()
        .find(|param| param.name() == name)
        .map(|param| param.value())
}

fn int_param(call: &ProcedureCall, name: &str) -> Option<i32> {
    match param(call, name) {
        Some(ParamValue::Int(value)) => *value,
        _ => None,
    }
}

fn text_param(call: &ProcedureCall, name: &str) -> ColumnValue {
    match param(call, name) {
        Some(ParamValue::VarChar {
            value: Some(text), ..
        }) => ColumnValue::Text(text.clone()),
        Some(ParamValue::Secret { value, .. }) => ColumnValue::Text(value.as_str().to_owned()),
        _ => ColumnValue::Null,
    }
}

fn ok(message: &str, rows: Vec<Row>) -> ProcedureOutcome {
    ProcedureOutcome::new(
        OutputStatus::new(true, Some(message.to_owned())),
        rows.into(),
    )
}

fn insert_doctor(tables: &mut Tables, call: &ProcedureCall) -> ProcedureOutcome {
    tables.next_doctor_id += 1;
    let id = tables.next_doctor_id;
    let columns = [
        ("PrimerNombre", "pPrimerNombre"),
        ("SegundoNombre", "pSegundoNombre"),
        ("ApellidoPaterno", "pApellidoPaterno"),
        ("ApellidoMaterno", "pApellidoMaterno"),
        ("Cedula", "pCedula"),
        ("Telefono", "pTelefono"),
        ("Especialidad", "pEspecialidad"),
        ("Email", "pEmail"),
    ]
    .into_iter()
    .map(|(column, name)| (column.to_owned(), text_param(call, name)))
    .collect();
    tables.doctors.insert(id, columns);
    ok(
        "Médico registrado correctamente",
        vec![Row::new().with("Id", ColumnValue::Int(i64::from(id)))],
    )
}

fn doctor_row(id: i32, columns: &[(String, ColumnValue)]) -> Row {
    let row = Row::new().with("Id", ColumnValue::Int(i64::from(id)));
    columns
        .iter()
        .fold(row, |row, (column, value)| row.with(column.as_str(), value.clone()))
        .with("Activo", ColumnValue::Bool(true))
        .with("FechaCreacion", ColumnValue::Timestamp(created_at()))
}

fn query_doctors(tables: &Tables, call: &ProcedureCall) -> ProcedureOutcome {
    match int_param(call, "pId") {
        None => ok(
            "Consulta exitosa",
            tables
                .doctors
                .iter()
                .map(|(id, columns)| doctor_row(*id, columns))
                .collect(),
        ),
        Some(id) => match tables.doctors.get(&id) {
            Some(columns) => ok("Consulta exitosa", vec![doctor_row(id, columns)]),
            None => ProcedureOutcome::new(
                OutputStatus::new(false, Some("Médico no encontrado".to_owned())),
                RowCursor::empty(),
            ),
        },
    }
}

fn delete_doctor(tables: &mut Tables, call: &ProcedureCall) -> ProcedureOutcome {
    let removed = int_param(call, "pId").and_then(|id| tables.doctors.remove(&id));
    let status = if removed.is_some() {
        OutputStatus::new(true, Some("Médico eliminado".to_owned()))
    } else {
        OutputStatus::new(false, Some("Médico no encontrado".to_owned()))
    };
    ProcedureOutcome::new(status, RowCursor::empty())
}

fn login(tables: &Tables, call: &ProcedureCall) -> ProcedureOutcome {
    let email = text_param(call, "pCorreo");
    let password = text_param(call, "pPassword");
    let found = tables.accounts.iter().find(|account| {
        email == ColumnValue::Text(account.email.clone())
            && password == ColumnValue::Text(account.password.clone())
    });
    match found {
        Some(account) => ok(
            "Bienvenido",
            vec![
                Row::new()
                    .with("Id", ColumnValue::Int(i64::from(account.id)))
                    .with("Correo", ColumnValue::Text(account.email.clone()))
                    .with("NombreCompleto", ColumnValue::Text(account.full_name.clone()))
                    .with(
                        "IdMedico",
                        account
                            .doctor_id
                            .map_or(ColumnValue::Null, |id| ColumnValue::Int(i64::from(id))),
                    )
                    .with("Activo", ColumnValue::Bool(account.active))
                    .with("FechaCreacion", ColumnValue::Timestamp(created_at())),
            ],
        ),
        None => ProcedureOutcome::new(
            OutputStatus::new(false, Some("Credenciales inválidas".to_owned())),
            RowCursor::empty(),
        ),
    }
}
