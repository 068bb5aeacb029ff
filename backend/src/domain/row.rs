//! Tabular rows produced by a procedure and the forward-only cursor over them.
//!
//! Entity decoders read columns by name through the typed accessors on
//! [`Row`]. Column lookup ignores ASCII case so `PrimerNombre` matches the
//! folded `primernombre` a database may report.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Int(i64),
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl ColumnValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

/// Reasons a row cannot be decoded into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDecodeError {
    #[error("column '{column}' is missing from the result set")]
    MissingColumn { column: String },
    #[error("column '{column}' is null but the field is not nullable")]
    UnexpectedNull { column: String },
    #[error("column '{column}' holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// One result row: ordered `(column, value)` pairs.
///
/// # Examples
/// ```
/// use clinica_backend::domain::{ColumnValue, Row};
///
/// let row = Row::new()
///     .with("Id", ColumnValue::Int(3))
///     .with("Telefono", ColumnValue::Null);
/// assert_eq!(row.int("id"), Ok(3));
/// assert_eq!(row.opt_string("Telefono"), Ok(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, ColumnValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, builder style.
    pub fn with(mut self, column: impl Into<String>, value: ColumnValue) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: ColumnValue) {
        self.columns.push((column.into(), value));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn lookup(&self, column: &str) -> Result<&ColumnValue, RowDecodeError> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
            .ok_or_else(|| RowDecodeError::MissingColumn {
                column: column.to_owned(),
            })
    }

    fn non_null<T>(column: &str, value: Option<T>) -> Result<T, RowDecodeError> {
        value.ok_or_else(|| RowDecodeError::UnexpectedNull {
            column: column.to_owned(),
        })
    }

    fn mismatch(column: &str, expected: &'static str, found: &ColumnValue) -> RowDecodeError {
        RowDecodeError::TypeMismatch {
            column: column.to_owned(),
            expected,
            found: found.kind(),
        }
    }

    fn int_value(column: &str, value: &ColumnValue) -> Result<Option<i32>, RowDecodeError> {
        match value {
            ColumnValue::Null => Ok(None),
            ColumnValue::Int(raw) => i32::try_from(*raw)
                .map(Some)
                .map_err(|_| Self::mismatch(column, "32-bit integer", value)),
            other => Err(Self::mismatch(column, "integer", other)),
        }
    }

    pub fn opt_int(&self, column: &str) -> Result<Option<i32>, RowDecodeError> {
        Self::int_value(column, self.lookup(column)?)
    }

    pub fn int(&self, column: &str) -> Result<i32, RowDecodeError> {
        Self::non_null(column, self.opt_int(column)?)
    }

    pub fn opt_string(&self, column: &str) -> Result<Option<String>, RowDecodeError> {
        match self.lookup(column)? {
            ColumnValue::Null => Ok(None),
            ColumnValue::Text(text) => Ok(Some(text.clone())),
            other => Err(Self::mismatch(column, "text", other)),
        }
    }

    pub fn string(&self, column: &str) -> Result<String, RowDecodeError> {
        Self::non_null(column, self.opt_string(column)?)
    }

    pub fn opt_boolean(&self, column: &str) -> Result<Option<bool>, RowDecodeError> {
        match self.lookup(column)? {
            ColumnValue::Null => Ok(None),
            ColumnValue::Bool(flag) => Ok(Some(*flag)),
            other => Err(Self::mismatch(column, "boolean", other)),
        }
    }

    pub fn boolean(&self, column: &str) -> Result<bool, RowDecodeError> {
        Self::non_null(column, self.opt_boolean(column)?)
    }

    pub fn opt_timestamp(&self, column: &str) -> Result<Option<NaiveDateTime>, RowDecodeError> {
        match self.lookup(column)? {
            ColumnValue::Null => Ok(None),
            ColumnValue::Timestamp(at) => Ok(Some(*at)),
            other => Err(Self::mismatch(column, "timestamp", other)),
        }
    }

    pub fn timestamp(&self, column: &str) -> Result<NaiveDateTime, RowDecodeError> {
        Self::non_null(column, self.opt_timestamp(column)?)
    }

    /// Integer in the first column, as returned by insert/update/delete
    /// procedures.
    pub fn leading_int(&self) -> Result<i32, RowDecodeError> {
        let (column, value) = self
            .columns
            .first()
            .ok_or_else(|| RowDecodeError::MissingColumn {
                column: "#0".to_owned(),
            })?;
        Self::non_null(column, Self::int_value(column, value)?)
    }
}

/// Forward-only cursor over a procedure's result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCursor {
    rows: VecDeque<Row>,
}

impl RowCursor {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Advance to the next row, if any.
    pub fn next_row(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl From<Vec<Row>> for RowCursor {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }
}

/// Decode the first row with `decode`, ignoring any further rows.
pub fn read_first<T>(
    cursor: &mut RowCursor,
    decode: impl FnOnce(&Row) -> Result<T, RowDecodeError>,
) -> Result<Option<T>, RowDecodeError> {
    cursor.next_row().as_ref().map(decode).transpose()
}

/// Drain the cursor, decoding every row.
pub fn read_all<T>(
    cursor: &mut RowCursor,
    decode: impl Fn(&Row) -> Result<T, RowDecodeError>,
) -> Result<Vec<T>, RowDecodeError> {
    let mut records = Vec::with_capacity(cursor.remaining());
    while let Some(row) = cursor.next_row() {
        records.push(decode(&row)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> Row {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        Row::new()
            .with("Id", ColumnValue::Int(12))
            .with("PrimerNombre", ColumnValue::Text("Ana".into()))
            .with("SegundoNombre", ColumnValue::Null)
            .with("Activo", ColumnValue::Bool(true))
            .with("FechaCreacion", ColumnValue::Timestamp(at))
            .with("Grande", ColumnValue::Int(i64::from(i32::MAX) + 1))
    }

    #[rstest]
    fn reads_typed_columns(row: Row) {
        assert_eq!(row.int("Id"), Ok(12));
        assert_eq!(row.string("PrimerNombre"), Ok("Ana".to_owned()));
        assert_eq!(row.boolean("Activo"), Ok(true));
        assert!(row.timestamp("FechaCreacion").is_ok());
    }

    #[rstest]
    fn nullable_columns_yield_none(row: Row) {
        assert_eq!(row.opt_string("SegundoNombre"), Ok(None));
        assert_eq!(row.opt_int("SegundoNombre"), Ok(None));
        assert_eq!(row.opt_timestamp("SegundoNombre"), Ok(None));
    }

    #[rstest]
    fn null_in_required_column_is_an_error(row: Row) {
        assert_eq!(
            row.string("SegundoNombre"),
            Err(RowDecodeError::UnexpectedNull {
                column: "SegundoNombre".into()
            })
        );
    }

    #[rstest]
    fn lookup_ignores_case(row: Row) {
        assert_eq!(row.string("primernombre"), Ok("Ana".to_owned()));
    }

    #[rstest]
    #[case("Cedula")]
    #[case("")]
    fn missing_columns_are_reported(row: Row, #[case] column: &str) {
        assert!(matches!(
            row.int(column),
            Err(RowDecodeError::MissingColumn { .. })
        ));
    }

    #[rstest]
    fn type_mismatch_names_both_kinds(row: Row) {
        let err = row.boolean("PrimerNombre").expect_err("text is not boolean");
        assert_eq!(
            err,
            RowDecodeError::TypeMismatch {
                column: "PrimerNombre".into(),
                expected: "boolean",
                found: "text",
            }
        );
    }

    #[rstest]
    fn out_of_range_integer_is_a_mismatch(row: Row) {
        assert!(matches!(
            row.int("Grande"),
            Err(RowDecodeError::TypeMismatch { .. })
        ));
    }

    #[rstest]
    fn leading_int_reads_first_column() {
        let row = Row::new().with("", ColumnValue::Int(41));
        assert_eq!(row.leading_int(), Ok(41));
        assert!(Row::new().leading_int().is_err());
    }

    #[rstest]
    fn read_first_ignores_trailing_rows() {
        let mut cursor = RowCursor::from(vec![
            Row::new().with("Id", ColumnValue::Int(1)),
            Row::new().with("Id", ColumnValue::Int(2)),
        ]);
        let first = read_first(&mut cursor, |row| row.int("Id")).expect("decode");
        assert_eq!(first, Some(1));
        assert_eq!(cursor.remaining(), 1);
    }

    #[rstest]
    fn read_all_drains_the_cursor() {
        let mut cursor = RowCursor::from(vec![
            Row::new().with("Id", ColumnValue::Int(1)),
            Row::new().with("Id", ColumnValue::Int(2)),
        ]);
        let all = read_all(&mut cursor, |row| row.int("Id")).expect("decode");
        assert_eq!(all, [1, 2]);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(read_first(&mut cursor, |row| row.int("Id")), Ok(None));
    }
}
