//! OpenAPI schema definitions for the result envelope.
//!
//! [`crate::domain::Envelope`] stays free of utoipa derives. These wrappers
//! mirror its wire shape, `{ "value", "message", "data" }`, for the generated
//! document.

use utoipa::ToSchema;

/// Result envelope carrying `data` of type `T`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnvelopeSchema<T: ToSchema> {
    /// Outcome flag reported by the stored procedure.
    #[schema(example = true)]
    value: bool,
    /// Procedure message, or the default text when it returned none.
    #[schema(example = "Operation succeeded.")]
    message: String,
    /// Procedure result; null when nothing was returned.
    data: Option<T>,
}

/// Envelope for procedures that run without a result set.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmptyEnvelopeSchema {
    #[schema(example = true)]
    value: bool,
    #[schema(example = "Registro eliminado")]
    message: String,
    /// Always null.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}

/// Envelope returned for every error response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FailureEnvelopeSchema {
    /// Always `false`.
    #[schema(example = false)]
    value: bool,
    /// Human-readable message. 500 responses carry a generic text.
    #[schema(example = "bearer token required")]
    message: String,
    /// Machine-readable details, such as the offending field.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}
