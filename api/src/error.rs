#[cfg(debug_assertions)]
use std::collections::HashMap;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
#[cfg(debug_assertions)]
use serde_json::Value;

use crate::store::StoreError;

/// Errors that are the client's fault and carry their own status code. The
/// `Display` output is sent back as the error message.
pub trait ApiRequestError: std::error::Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn code(&self) -> &'static str {
        "ERR"
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiRequestError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            // Business-rule violations share the validation status
            ApiError::Conflict(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Validation(_) => "VALIDATION_ERR",
        }
    }
}

#[derive(Debug)]
pub enum ServerError {
    Store(StoreError),
}

impl Serialize for ServerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            ServerError::Store(e) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", &e.to_string())?;
                map.end()
            }
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    ServerError {
        error: ServerError,

        #[cfg(debug_assertions)]
        backtrace: backtrace::Backtrace,
    },
    RequestError {
        code: &'static str,
        msg: String,
        status_code: StatusCode,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RequestError { status_code, .. } => *status_code,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,

    #[cfg(debug_assertions)]
    #[serde(skip_serializing_if = "Option::is_none")]
    debug_info: Option<HashMap<&'static str, Value>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let error_response = match self {
            AppError::ServerError {
                error,
                #[cfg(debug_assertions)]
                backtrace,
            } => {
                tracing::error!(?error, "Request failed with a server error");
                ErrorResponse {
                    success: false,
                    error: "Server Error".into(),
                    code: "SERVER_ERR",
                    #[cfg(debug_assertions)]
                    debug_info: Some(HashMap::from([
                        (
                            "backtrace",
                            serde_json::to_value(filter_backtrace(&backtrace))
                                .unwrap_or_default(),
                        ),
                        ("error", serde_json::to_value(&error).unwrap_or_default()),
                    ])),
                }
            }
            AppError::RequestError { code, msg, .. } => ErrorResponse {
                success: false,
                error: msg,
                code,
                #[cfg(debug_assertions)]
                debug_info: None,
            },
        };

        (status_code, Json(error_response)).into_response()
    }
}

fn request_error<E: ApiRequestError>(e: E) -> AppError {
    AppError::RequestError {
        code: e.code(),
        msg: e.to_string(),
        status_code: e.status_code(),
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        request_error(e)
    }
}

impl From<crate::identity::AuthenticationError> for AppError {
    fn from(e: crate::identity::AuthenticationError) -> Self {
        request_error(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // The store enforces uniqueness at write time, e.g. one comment
            // per user per blog.
            StoreError::UniqueViolation(constraint) => {
                tracing::debug!(%constraint, "Unique constraint violated");
                ApiError::Conflict("Duplicate field value entered".into()).into()
            }
            e => AppError::ServerError {
                error: ServerError::Store(e),

                #[cfg(debug_assertions)]
                backtrace: backtrace::Backtrace::new(),
            },
        }
    }
}

impl From<(String, StatusCode)> for AppError {
    fn from((msg, status_code): (String, StatusCode)) -> Self {
        AppError::RequestError {
            code: "ERR",
            msg,
            status_code,
        }
    }
}

#[cfg(debug_assertions)]
#[derive(Serialize, Debug)]
struct FrameInfo {
    name: String,
    loc: String,
}

#[cfg(debug_assertions)]
fn filter_backtrace(backtrace: &backtrace::Backtrace) -> Vec<FrameInfo> {
    const MODULE_PREFIX: &str = concat!(env!("CARGO_PKG_NAME"), "::");
    let mut frames_info: Vec<FrameInfo> = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            if let (Some(name), Some(filename), Some(lineno)) = (
                symbol.name().map(|n| n.to_string()),
                symbol.filename(),
                symbol.lineno(),
            ) {
                if name.contains(MODULE_PREFIX) {
                    frames_info.push(FrameInfo {
                        name,
                        loc: format!("{}:{}", filename.display(), lineno),
                    });
                }
            }
        }
    }

    frames_info
}
