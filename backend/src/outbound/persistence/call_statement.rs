//! Rendering a [`ProcedureCall`] as a PostgreSQL `CALL` statement.
//!
//! Procedures follow the clinic convention: inputs by name, then
//! `INOUT pResultado boolean` and `INOUT pMsg varchar`; query procedures add
//! `INOUT pCursor refcursor` and open it over their result set. Identifiers
//! are emitted double-quoted, so procedures and parameters must be declared
//! with quoted mixed-case names (`"procCatMedicosCon"("pId" integer, ...)`).
//! Each part of a schema-qualified procedure name is quoted separately.

use std::fmt;

use chrono::NaiveDateTime;
use tokio_postgres::types::ToSql;
use zeroize::Zeroizing;

use crate::domain::{ExecutionMode, ParamValue, ProcedureCall};

pub(crate) const SUCCESS_PARAM: &str = "pResultado";
pub(crate) const MESSAGE_PARAM: &str = "pMsg";
pub(crate) const CURSOR_PARAM: &str = "pCursor";
/// Portal name handed to query procedures for their result set.
pub(crate) const RESULT_CURSOR: &str = "sp_rows";

/// Driver-ready bind value.
#[derive(Clone, PartialEq)]
pub(crate) enum BindValue {
    Int(Option<i32>),
    Text(Option<String>),
    Secret(Zeroizing<String>),
    Bool(Option<bool>),
    Timestamp(Option<NaiveDateTime>),
}

impl BindValue {
    fn cast(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Text(_) | Self::Secret(_) => "varchar",
            Self::Bool(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub(crate) fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            Self::Int(v) => v,
            Self::Text(v) => v,
            Self::Secret(v) => &**v,
            Self::Bool(v) => v,
            Self::Timestamp(v) => v,
        }
    }
}

impl fmt::Debug for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "Int({v:?})"),
            Self::Text(v) => write!(f, "Text({v:?})"),
            Self::Secret(_) => f.write_str("Secret(<redacted>)"),
            Self::Bool(v) => write!(f, "Bool({v:?})"),
            Self::Timestamp(v) => write!(f, "Timestamp({v:?})"),
        }
    }
}

impl From<&ParamValue> for BindValue {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Int(v) => Self::Int(*v),
            ParamValue::VarChar { value, .. } => Self::Text(value.clone()),
            ParamValue::Secret { value, .. } => Self::Secret(value.clone()),
            ParamValue::Bool(v) => Self::Bool(*v),
            ParamValue::Timestamp(v) => Self::Timestamp(*v),
        }
    }
}

/// Quote one identifier, doubling embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a possibly schema-qualified name part by part.
fn quote_qualified(name: &str) -> String {
    name.split('.').map(quote_ident).collect::<Vec<_>>().join(".")
}

/// SQL text plus positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CallStatement {
    pub(crate) sql: String,
    pub(crate) binds: Vec<BindValue>,
}

impl CallStatement {
    /// Render `call`; the caller must have validated it.
    pub(crate) fn render(call: &ProcedureCall, mode: ExecutionMode) -> Self {
        let mut args = Vec::with_capacity(call.params().len() + 3);
        let mut binds = Vec::with_capacity(call.params().len());
        for (index, param) in call.params().iter().enumerate() {
            let bind = BindValue::from(param.value());
            args.push(format!(
                "{} => ${}::{}",
                quote_ident(param.name()),
                index + 1,
                bind.cast()
            ));
            binds.push(bind);
        }
        args.push(format!("{} => NULL", quote_ident(SUCCESS_PARAM)));
        args.push(format!("{} => NULL", quote_ident(MESSAGE_PARAM)));
        if mode == ExecutionMode::Query {
            args.push(format!(
                "{} => '{RESULT_CURSOR}'",
                quote_ident(CURSOR_PARAM)
            ));
        }
        Self {
            sql: format!("CALL {}({})", quote_qualified(call.name()), args.join(", ")),
            binds,
        }
    }

    pub(crate) fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.binds.iter().map(BindValue::as_sql).collect()
    }
}

/// Statement draining the result cursor.
pub(crate) fn fetch_cursor_sql() -> String {
    format!("FETCH ALL FROM {}", quote_ident(RESULT_CURSOR))
}

/// Statement checking whether the procedure opened the result cursor.
pub(crate) const CURSOR_OPEN_SQL: &str = "SELECT 1 FROM pg_cursors WHERE name = $1";

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn renders_query_call_with_casts_and_outputs() {
        let call = ProcedureCall::new("procCatMedicosCon").int("pId", None::<i32>);
        let statement = CallStatement::render(&call, ExecutionMode::Query);
        assert_eq!(
            statement.sql,
            r#"CALL "procCatMedicosCon"("pId" => $1::integer, "pResultado" => NULL, "pMsg" => NULL, "pCursor" => 'sp_rows')"#
        );
        assert_eq!(statement.binds, [BindValue::Int(None)]);
    }

    #[rstest]
    fn non_query_call_omits_cursor() {
        let call = ProcedureCall::new("procCatPacientesDel").int("pId", 3);
        let statement = CallStatement::render(&call, ExecutionMode::NonQuery);
        assert_eq!(
            statement.sql,
            r#"CALL "procCatPacientesDel"("pId" => $1::integer, "pResultado" => NULL, "pMsg" => NULL)"#
        );
    }

    #[rstest]
    fn numbers_placeholders_in_parameter_order() {
        let call = ProcedureCall::new("procConsultasIns")
            .int("pIdMedico", 1)
            .text("pSintomas", Some("tos"))
            .boolean("pUrgente", false)
            .timestamp("pFechaConsulta", None::<NaiveDateTime>);
        let statement = CallStatement::render(&call, ExecutionMode::Query);
        assert!(statement.sql.contains("\"pIdMedico\" => $1::integer"));
        assert!(statement.sql.contains("\"pSintomas\" => $2::varchar"));
        assert!(statement.sql.contains("\"pUrgente\" => $3::boolean"));
        assert!(statement.sql.contains("\"pFechaConsulta\" => $4::timestamp"));
        assert_eq!(statement.params().len(), 4);
        assert_eq!(statement.binds[1], BindValue::Text(Some("tos".into())));
    }

    #[rstest]
    fn parameterless_call_still_carries_outputs() {
        let statement = CallStatement::render(&ProcedureCall::new("procPing"), ExecutionMode::NonQuery);
        assert_eq!(
            statement.sql,
            r#"CALL "procPing"("pResultado" => NULL, "pMsg" => NULL)"#
        );
        assert!(statement.binds.is_empty());
    }

    #[rstest]
    fn secret_values_bind_as_varchar_without_leaking() {
        let call = ProcedureCall::new("procAuthLogin")
            .varchar("pCorreo", Some("ana@clinica.mx"), 200)
            .secret_varchar("pPassword", "hunter2", 500);
        let statement = CallStatement::render(&call, ExecutionMode::Query);
        assert!(statement.sql.contains("\"pPassword\" => $2::varchar"));
        assert!(matches!(&statement.binds[1], BindValue::Secret(v) if v.as_str() == "hunter2"));
        assert!(!format!("{statement:?}").contains("hunter2"));
    }

    #[rstest]
    fn fetch_targets_result_cursor() {
        assert_eq!(fetch_cursor_sql(), r#"FETCH ALL FROM "sp_rows""#);
    }

    #[rstest]
    fn quotes_each_part_of_a_qualified_name() {
        let call = ProcedureCall::new("clinica.procCatMedicosDel").int("pId", 1);
        let statement = CallStatement::render(&call, ExecutionMode::NonQuery);
        assert!(
            statement
                .sql
                .starts_with(r#"CALL "clinica"."procCatMedicosDel"("pId" => $1::integer"#),
            "unexpected SQL: {}",
            statement.sql
        );
    }
}
