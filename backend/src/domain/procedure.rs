//! Stored-procedure call description.
//!
//! A [`ProcedureCall`] names a procedure and carries its ordered input
//! parameters. Every call implicitly carries the two conventional outputs (a
//! success flag and a message); executors append them and report their
//! values back as an [`OutputStatus`].

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use zeroize::Zeroizing;

static PROCEDURE_NAME_RE: OnceLock<Regex> = OnceLock::new();
static PARAM_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn procedure_name_regex() -> &'static Regex {
    PROCEDURE_NAME_RE.get_or_init(|| {
        // Optional schema qualifier, e.g. `clinica.procCatMedicosCon`.
        let pattern = r"^([A-Za-z_][A-Za-z0-9_]*\.)?[A-Za-z_][A-Za-z0-9_]*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("procedure name regex failed to compile: {error}"))
    })
}

fn param_name_regex() -> &'static Regex {
    PARAM_NAME_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z_][A-Za-z0-9_]*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("parameter name regex failed to compile: {error}"))
    })
}

/// Problems detected before a call reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcedureCallError {
    #[error("invalid procedure name '{0}'")]
    InvalidProcedureName(String),
    #[error("invalid parameter name '{0}'")]
    InvalidParamName(String),
    #[error("parameter {param} accepts at most {max_len} characters, got {actual}")]
    ValueTooLong {
        param: String,
        max_len: usize,
        actual: usize,
    },
}

/// Typed value bound to an input parameter. `None` binds SQL `NULL`.
#[derive(Clone, PartialEq)]
pub enum ParamValue {
    Int(Option<i32>),
    /// Character data; `max_len` of `None` means unbounded.
    VarChar {
        value: Option<String>,
        max_len: Option<usize>,
    },
    /// Bounded character data wiped from memory on drop and never printed.
    Secret {
        value: Zeroizing<String>,
        max_len: usize,
    },
    Bool(Option<bool>),
    Timestamp(Option<NaiveDateTime>),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        match self {
            Self::Int(v) => v.is_none(),
            Self::VarChar { value, .. } => value.is_none(),
            Self::Secret { .. } => false,
            Self::Bool(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "Int({v:?})"),
            Self::VarChar { value, max_len } => write!(f, "VarChar({value:?}, max={max_len:?})"),
            Self::Secret { max_len, .. } => write!(f, "Secret(<redacted>, max={max_len})"),
            Self::Bool(v) => write!(f, "Bool({v:?})"),
            Self::Timestamp(v) => write!(f, "Timestamp({v:?})"),
        }
    }
}

/// Named input parameter.
#[derive(Clone, PartialEq)]
pub struct ProcedureParam {
    name: String,
    value: ParamValue,
}

impl ProcedureParam {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// Whether the value is withheld from logs and `Debug` output.
    pub fn is_sensitive(&self) -> bool {
        matches!(self.value, ParamValue::Secret { .. })
    }
}

impl fmt::Debug for ProcedureParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sensitive() {
            write!(f, "{}=<redacted>", self.name)
        } else {
            write!(f, "{}={:?}", self.name, self.value)
        }
    }
}

/// How the executor should run the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Expose the procedure's result set as a row cursor.
    Query,
    /// Run for side effects only; no rows are read.
    NonQuery,
}

/// Values of the two conventional output parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputStatus {
    pub success: bool,
    pub message: Option<String>,
}

impl OutputStatus {
    pub fn new(success: bool, message: Option<String>) -> Self {
        Self { success, message }
    }
}

/// A named procedure plus its ordered input parameters.
///
/// # Examples
/// ```
/// use clinica_backend::domain::ProcedureCall;
///
/// let call = ProcedureCall::new("procCatMedicosCon").int("pId", Some(4));
/// assert_eq!(call.name(), "procCatMedicosCon");
/// assert_eq!(call.params().len(), 1);
/// assert!(call.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    name: String,
    params: Vec<ProcedureParam>,
}

impl ProcedureCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ProcedureParam] {
        &self.params
    }

    fn push(mut self, name: &str, value: ParamValue) -> Self {
        self.params.push(ProcedureParam {
            name: name.to_owned(),
            value,
        });
        self
    }

    pub fn int(self, name: &str, value: impl Into<Option<i32>>) -> Self {
        self.push(name, ParamValue::Int(value.into()))
    }

    /// Bounded character parameter, e.g. `VARCHAR(200)`.
    pub fn varchar<S: Into<String>>(self, name: &str, value: Option<S>, max_len: usize) -> Self {
        let value = ParamValue::VarChar {
            value: value.map(Into::into),
            max_len: Some(max_len),
        };
        self.push(name, value)
    }

    /// Bounded character parameter kept in zeroizing storage and excluded
    /// from debug output.
    pub fn secret_varchar(self, name: &str, value: &str, max_len: usize) -> Self {
        let value = ParamValue::Secret {
            value: Zeroizing::new(value.to_owned()),
            max_len,
        };
        self.push(name, value)
    }

    /// Unbounded character parameter.
    pub fn text<S: Into<String>>(self, name: &str, value: Option<S>) -> Self {
        let value = ParamValue::VarChar {
            value: value.map(Into::into),
            max_len: None,
        };
        self.push(name, value)
    }

    pub fn boolean(self, name: &str, value: impl Into<Option<bool>>) -> Self {
        self.push(name, ParamValue::Bool(value.into()))
    }

    pub fn timestamp(self, name: &str, value: impl Into<Option<NaiveDateTime>>) -> Self {
        self.push(name, ParamValue::Timestamp(value.into()))
    }

    /// Check identifiers and declared sizes.
    ///
    /// Oversize character values are rejected rather than truncated.
    pub fn validate(&self) -> Result<(), ProcedureCallError> {
        if !procedure_name_regex().is_match(&self.name) {
            return Err(ProcedureCallError::InvalidProcedureName(self.name.clone()));
        }
        for param in &self.params {
            if !param_name_regex().is_match(&param.name) {
                return Err(ProcedureCallError::InvalidParamName(param.name.clone()));
            }
            let bounded = match &param.value {
                ParamValue::VarChar {
                    value: Some(text),
                    max_len: Some(max_len),
                } => Some((text.as_str(), *max_len)),
                ParamValue::Secret { value, max_len } => Some((value.as_str(), *max_len)),
                _ => None,
            };
            if let Some((text, max_len)) = bounded {
                let actual = text.chars().count();
                if actual > max_len {
                    return Err(ProcedureCallError::ValueTooLong {
                        param: param.name.clone(),
                        max_len,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
