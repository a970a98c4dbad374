//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::filters;
use crate::subscribers::SubscriberError;
use crate::wordpress::WpError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// WordPress API operation failed.
    #[error("CMS error: {0}")]
    Wp(#[from] WpError),

    /// Subscriber store operation failed.
    #[error("Subscriber error: {0}")]
    Subscriber(#[from] SubscriberError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authorized.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Standalone error page, deliberately independent of the main layout so a
/// broken render path cannot take the error page down with it.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status_code: u16,
    title: &'static str,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        let is_server_error = match &self {
            Self::Wp(WpError::NotFound(_)) => false,
            Self::Wp(_) | Self::Subscriber(_) | Self::Session(_) | Self::Internal(_) => true,
            _ => false,
        };
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Wp(WpError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Wp(_) => StatusCode::BAD_GATEWAY,
            Self::Subscriber(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        };

        // Fragment-style statuses get plain text; page-level statuses get a
        // rendered error page. Internal details never reach the client.
        match status {
            StatusCode::NOT_FOUND => error_page(
                status,
                "Content Not Found",
                "The content you're looking for doesn't exist or may have been moved.",
            ),
            StatusCode::BAD_GATEWAY => error_page(
                status,
                "Content Temporarily Unavailable",
                "We're having trouble reaching our content service. Please try again in a moment.",
            ),
            StatusCode::INTERNAL_SERVER_ERROR => error_page(
                status,
                "Something Went Wrong",
                "An unexpected error occurred on our end. Please try again.",
            ),
            _ => {
                let message = match &self {
                    Self::BadRequest(msg) | Self::Unauthorized(msg) => msg.clone(),
                    Self::RateLimited => "Too many requests".to_string(),
                    _ => "Request failed".to_string(),
                };
                (status, message).into_response()
            }
        }
    }
}

/// Render the standalone error page, falling back to plain text if the
/// template itself fails.
fn error_page(status: StatusCode, title: &'static str, message: &'static str) -> Response {
    let template = ErrorTemplate {
        status_code: status.as_u16(),
        title,
        message,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render error page");
            (status, title).into_response()
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("post: budget-travel-guide".to_string());
        assert_eq!(err.to_string(), "Not found: post: budget-travel-guide");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::RateLimited),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wp_not_found_maps_to_404() {
        let err = AppError::Wp(WpError::NotFound("page: about".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_wp_upstream_failure_maps_to_502() {
        let err = AppError::Wp(WpError::Status(503));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_page_renders_html() {
        let response = AppError::NotFound("missing".to_string()).into_response();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }
}
