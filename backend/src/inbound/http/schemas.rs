//! OpenAPI schema definitions for the error envelope.
//!
//! The wire error body is a thin `{ "error": message }` envelope rather
//! than the richer domain `Error`, so the schema lives here in the adapter
//! layer next to the mapping that produces it.

use utoipa::ToSchema;

/// OpenAPI schema for error responses.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable failure message.
    #[schema(example = "missing required field: actionType")]
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn error_schema_exposes_the_error_field() {
        let schema_json =
            serde_json::to_string(&ErrorSchema::schema()).expect("schema serialises to JSON");
        assert!(
            schema_json.contains("\"error\""),
            "schema should contain the error field"
        );
    }
}
