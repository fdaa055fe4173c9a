//! OpenAPI stand-ins for the domain error payload.
//!
//! `domain::Error` stays free of utoipa derives, so the documented shape is
//! declared here and registered under the domain type's name. Field names
//! must track the camelCase wire format the domain serialises.

use utoipa::ToSchema;

/// Documented form of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state, such as a taken course code.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Body of every non-2xx response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message. Internal failures carry a generic text.
    #[schema(example = "course CS101 is full")]
    message: String,
    /// Request trace id, also sent in the `trace-id` header.
    #[schema(example = "6f1c2e9a-1f0b-4a53-9a43-2b4f3f0a8c11")]
    trace_id: Option<String>,
    /// Structured context such as `{"field": "code", "code": "too_long"}`.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;
    use utoipa::PartialSchema;

    use super::*;
    use crate::domain::ErrorCode;

    fn schema_json<T: PartialSchema>() -> Value {
        serde_json::to_value(T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn schemas_register_under_domain_names() {
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
    }

    #[rstest]
    #[case(ErrorCode::InvalidRequest)]
    #[case(ErrorCode::Unauthorized)]
    #[case(ErrorCode::Forbidden)]
    #[case(ErrorCode::NotFound)]
    #[case(ErrorCode::Conflict)]
    #[case(ErrorCode::ServiceUnavailable)]
    #[case(ErrorCode::InternalError)]
    fn every_domain_code_is_documented(#[case] code: ErrorCode) {
        let wire = serde_json::to_value(code).expect("code serialises");
        let wire = wire.as_str().expect("codes serialise as strings");
        let documented = schema_json::<ErrorCodeSchema>().to_string();
        assert!(
            documented.contains(&format!("\"{wire}\"")),
            "{wire} missing from {documented}"
        );
    }

    #[rstest]
    fn error_fields_follow_the_wire_format() {
        let schema = schema_json::<ErrorSchema>();
        let properties = schema["properties"]
            .as_object()
            .expect("error schema has properties");
        let mut names: Vec<&str> = properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["code", "details", "message", "traceId"]);
    }
}
