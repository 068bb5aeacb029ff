//! Conversion from driver rows to domain rows and output status.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tokio_postgres::Row as PgRow;
use tokio_postgres::types::Type;

use super::call_statement::{MESSAGE_PARAM, SUCCESS_PARAM};
use crate::domain::ports::ProcedureExecutorError;
use crate::domain::{ColumnValue, OutputStatus, Row};

fn decode_error(column: &str, err: &tokio_postgres::Error) -> ProcedureExecutorError {
    ProcedureExecutorError::decode(format!("column {column}: {err}"))
}

fn cell(row: &PgRow, index: usize) -> Result<ColumnValue, ProcedureExecutorError> {
    let column = &row.columns()[index];
    let name = column.name();
    let ty = column.type_();
    let value = if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)
            .map(|v| v.map_or(ColumnValue::Null, |n| ColumnValue::Int(i64::from(n))))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)
            .map(|v| v.map_or(ColumnValue::Null, |n| ColumnValue::Int(i64::from(n))))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)
            .map(|v| v.map_or(ColumnValue::Null, ColumnValue::Int))
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index)
            .map(|v| v.map_or(ColumnValue::Null, ColumnValue::Bool))
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(ty) {
        row.try_get::<_, Option<String>>(index)
            .map(|v| v.map_or(ColumnValue::Null, ColumnValue::Text))
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(index)
            .map(|v| v.map_or(ColumnValue::Null, ColumnValue::Timestamp))
    } else if *ty == Type::TIMESTAMPTZ {
        row.try_get::<_, Option<DateTime<Utc>>>(index).map(|v| {
            v.map_or(ColumnValue::Null, |at| ColumnValue::Timestamp(at.naive_utc()))
        })
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(index).map(|v| {
            v.and_then(|d| d.and_hms_opt(0, 0, 0))
                .map_or(ColumnValue::Null, ColumnValue::Timestamp)
        })
    } else {
        return Err(ProcedureExecutorError::decode(format!(
            "column {name} has unsupported type {ty}"
        )));
    };
    value.map_err(|err| decode_error(name, &err))
}

/// Convert a driver row into a domain row, keeping column order.
pub(crate) fn to_domain_row(row: &PgRow) -> Result<Row, ProcedureExecutorError> {
    let mut converted = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        converted.push(column.name(), cell(row, index)?);
    }
    Ok(converted)
}

/// Read the output parameters from the row produced by `CALL`.
///
/// A missing or non-boolean flag counts as failure; a non-text message is
/// ignored.
pub(crate) fn output_status(row: Option<&PgRow>) -> OutputStatus {
    let Some(row) = row else {
        return OutputStatus::default();
    };
    let find = |wanted: &str| {
        row.columns()
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(wanted))
    };
    let success = find(SUCCESS_PARAM)
        .and_then(|index| row.try_get::<_, Option<bool>>(index).ok().flatten())
        .unwrap_or(false);
    let message = find(MESSAGE_PARAM)
        .and_then(|index| row.try_get::<_, Option<String>>(index).ok().flatten());
    OutputStatus::new(success, message)
}
