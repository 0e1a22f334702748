//! API error handling
//!
//! Maps application failures to HTTP statuses and `{error, code, details?}`
//! bodies. In production, messages that look like they carry internal
//! details are replaced with generic text.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use infrastructure::TemplateError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Strip file paths, URLs and connection details from a client-facing message
fn sanitize_error_message(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = [
        "/home/",
        "/users/",
        "/var/",
        "/etc/",
        "c:\\",
        "sqlite",
        "panicked at",
        ".rs:",
        "connection refused",
        "error sending request",
    ];

    let lower = msg.to_lowercase();
    if msg.contains("://") || sensitive_patterns.iter().any(|p| lower.contains(p)) {
        return GENERIC_MESSAGE.to_string();
    }
    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Geocoding failed: {0}")]
    GeocodeFailed(String),

    #[error("Geocoder unavailable: {0}")]
    GeocoderUnavailable(String),

    #[error("No route found")]
    NoRouteFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::GeocodeFailed(_) | Self::NoRouteFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::GeocoderUnavailable(_) | Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_input",
            Self::Unauthorized(_) => "unauthorized",
            Self::GeocodeFailed(_) => "geocode_failed",
            Self::GeocoderUnavailable(_) => "geocoder_unavailable",
            Self::NoRouteFound => "no_route_found",
            Self::Conflict(_) => "conflict",
            Self::BadGateway(_) => "routing_failed",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    fn body(&self, expose: bool) -> ErrorResponse {
        let (error, details) = match self {
            Self::BadRequest(msg) | Self::GeocodeFailed(msg) | Self::Conflict(msg) => {
                (sanitize_error_message(msg, expose), None)
            },
            Self::NoRouteFound => ("No routes found".to_string(), None),
            // Same message for unknown users and wrong passwords
            Self::Unauthorized(msg) => (
                if expose {
                    msg.clone()
                } else {
                    "Authentication required".to_string()
                },
                None,
            ),
            Self::GeocoderUnavailable(msg) => (
                "Geocoding service unavailable".to_string(),
                Some(sanitize_error_message(msg, expose)),
            ),
            Self::BadGateway(msg) => (
                "Routing failed".to_string(),
                Some(sanitize_error_message(msg, expose)),
            ),
            Self::ServiceUnavailable(msg) => (
                "Service temporarily unavailable".to_string(),
                expose.then(|| msg.clone()),
            ),
            Self::Internal(msg) => (
                "An internal error occurred".to_string(),
                expose.then(|| msg.clone()),
            ),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            tracing::error!(error = %self, "Request failed");
        }
        let body = self.body(should_expose_details());
        (self.status(), Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            e @ ApplicationError::GeocodeFailure { .. } => Self::GeocodeFailed(e.to_string()),
            e @ ApplicationError::GeocoderUnavailable { .. } => {
                Self::GeocoderUnavailable(e.to_string())
            },
            ApplicationError::NoRouteFound => Self::NoRouteFound,
            ApplicationError::RoutingFailure(msg) => {
                Self::BadGateway(msg.unwrap_or_else(|| "no details from router".to_string()))
            },
            ApplicationError::NotAuthorized(msg) => Self::Unauthorized(msg),
            ApplicationError::AlreadyExists(msg) => Self::Conflict(msg),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (ApplicationError::InvalidInput("x".into()), 400),
            (ApplicationError::geocode_failure("Nowhereville", "no match"), 404),
            (ApplicationError::geocoder_unavailable("Point A", "HTTP 503"), 502),
            (ApplicationError::ExternalService("down".into()), 503),
            (ApplicationError::NoRouteFound, 404),
            (ApplicationError::RoutingFailure(None), 502),
            (ApplicationError::RoutingFailure(Some("NoRoute".into())), 502),
            (ApplicationError::NotAuthorized("Invalid credentials".into()), 401),
            (ApplicationError::AlreadyExists("a@b.c".into()), 409),
            (ApplicationError::Internal("boom".into()), 500),
            (ApplicationError::Configuration("bad".into()), 500),
            (
                ApplicationError::Domain(DomainError::InvalidEmailAddress("x".into())),
                400,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), status);
        }
    }

    #[test]
    fn geocode_failure_names_query() {
        let err = ApiError::from(ApplicationError::geocode_failure("Nowhereville", "no match"));
        let body = err.body(false);
        assert_eq!(body.code, "geocode_failed");
        assert!(body.error.contains("Nowhereville"));
    }

    #[test]
    fn geocoder_outage_is_bad_gateway_not_not_found() {
        let err = ApiError::from(ApplicationError::geocoder_unavailable(
            "Point A",
            "geocoding request timed out",
        ));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        let body = err.body(false);
        assert_eq!(body.code, "geocoder_unavailable");
        assert_eq!(body.error, "Geocoding service unavailable");
        assert!(body.details.unwrap().contains("timed out"));
    }

    #[test]
    fn routing_failure_carries_router_message_as_details() {
        let err = ApiError::from(ApplicationError::RoutingFailure(Some(
            "Impossible route between points".into(),
        )));
        let body = err.body(false);
        assert_eq!(body.error, "Routing failed");
        assert_eq!(
            body.details.as_deref(),
            Some("Impossible route between points")
        );
    }

    #[test]
    fn internal_details_hidden_when_not_exposed() {
        let err = ApiError::Internal("database at /var/lib/x.db locked".into());
        assert!(err.body(false).details.is_none());
        assert!(err.body(true).details.unwrap().contains("/var/lib"));
    }

    #[test]
    fn urls_are_sanitized() {
        let msg = "error sending request for url (https://router.example/route)";
        assert_eq!(sanitize_error_message(msg, false), GENERIC_MESSAGE);
        assert_eq!(sanitize_error_message(msg, true), msg);
    }

    #[test]
    fn plain_messages_pass_through() {
        assert_eq!(
            sanitize_error_message("origin must not be empty", false),
            "origin must not be empty"
        );
    }

    #[test]
    fn details_omitted_from_json_when_absent() {
        let json = serde_json::to_value(ApiError::NoRouteFound.body(true)).unwrap();
        assert_eq!(json["code"], "no_route_found");
        assert!(json.get("details").is_none());
    }
}
