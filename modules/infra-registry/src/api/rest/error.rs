use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::api::rest::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;
use crate::domain::validation::ValidationErrors;
use crate::errors::ErrorCode;

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to RFC9457 Problem using the catalog
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    match e {
        DomainError::NotFound { .. } => {
            ErrorCode::NOT_FOUND.with_context(e.to_string(), instance, trace_id)
        }
        DomainError::Validation(errors) => validation_problem(errors, instance),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::INTERNAL_DATABASE.with_context(
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
    }
}

pub fn validation_problem(errors: &ValidationErrors, instance: &str) -> Problem {
    ErrorCode::VALIDATION
        .with_context(
            "Request validation failed",
            instance,
            current_trace_id(),
        )
        .with_errors(errors.violations().iter().map(Into::into).collect())
}

fn malformed(field: &str, message: String, instance: &str) -> Problem {
    ErrorCode::VALIDATION
        .with_context(message.clone(), instance, current_trace_id())
        .with_errors(vec![ValidationViolation {
            field: field.to_owned(),
            message,
            code: Some("malformed".to_owned()),
        }])
}

/// Unreadable request bodies are 422, a missing JSON content type is 415.
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ErrorCode::UNSUPPORTED_MEDIA_TYPE
            .with_context(rejection.body_text(), instance, current_trace_id()),
        _ => malformed("body", rejection.body_text(), instance),
    }
}

pub fn query_rejection_to_problem(rejection: &QueryRejection, instance: &str) -> Problem {
    malformed("query", rejection.body_text(), instance)
}

pub fn path_rejection_to_problem(rejection: &PathRejection, instance: &str) -> Problem {
    malformed("id", rejection.body_text(), instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Validator;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let p = domain_error_to_problem(&DomainError::not_found("Bridge", 99999), "/api/bridges/99999");

        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.detail, "Bridge with id 99999 not found");
        assert_eq!(p.instance, "/api/bridges/99999");
    }

    #[test]
    fn validation_maps_every_violation() {
        let mut v = Validator::new();
        v.required::<String>("name", None);
        v.required::<String>("location", None);
        let err = DomainError::from(v.into_errors());

        let p = domain_error_to_problem(&err, "/api/bridges");

        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = p.errors.unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].code.as_deref(), Some("required"));
    }

    #[test]
    fn database_error_is_hidden() {
        let p = domain_error_to_problem(&DomainError::database("disk I/O error"), "/api/bridges");

        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("disk"));
    }
}
