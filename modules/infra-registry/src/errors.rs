//! Error catalog: one static definition per problem type the API can return.

use http::StatusCode;

use crate::api::rest::problem::Problem;

/// Static error definition from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status, self.title, detail)
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Problem enriched with the failing request path and current trace id.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        self.as_problem(detail)
            .with_instance(instance)
            .with_trace_id(trace_id)
    }
}

pub struct ErrorCode;

impl ErrorCode {
    pub const NOT_FOUND: ErrDef = ErrDef {
        status: StatusCode::NOT_FOUND,
        title: "Not Found",
        code: "infra.record.not_found",
        type_url: "urn:city-infra:problem:not-found",
    };

    pub const VALIDATION: ErrDef = ErrDef {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        title: "Validation Failed",
        code: "infra.request.validation",
        type_url: "urn:city-infra:problem:validation",
    };

    pub const UNSUPPORTED_MEDIA_TYPE: ErrDef = ErrDef {
        status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
        title: "Unsupported Media Type",
        code: "infra.request.media_type",
        type_url: "urn:city-infra:problem:unsupported-media-type",
    };

    pub const INTERNAL_DATABASE: ErrDef = ErrDef {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Internal Server Error",
        code: "infra.internal.database",
        type_url: "urn:city-infra:problem:internal",
    };
}
