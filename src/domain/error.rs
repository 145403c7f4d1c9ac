use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};

use actix_web::error::UrlencodedError;

use once_cell::sync::Lazy;
use validator::{ValidationErrors, ValidationErrorsKind};

use serde::Serialize;
use utoipa::ToSchema;

use serde_json::{Map, Value, json, to_string};

use argon2::password_hash::errors::Error::{self as Argon2Error, Password};

use crate::config;
use crate::domain::repositories::repository::RepositoryError;

pub type AppResult<T> = core::result::Result<T, AppError>;

static EXPOSE_TRACE: Lazy<bool> = Lazy::new(|| !config::is_production());

macro_rules! static_error {
    ($name:ident, $status:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name(message: impl ToString) -> AppError {
            AppError {
                message: message.to_string(),
                code: $status.as_u16(),
                trace: None,
            }
        }
    };

    ($name:ident, $status:expr, $default:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name() -> AppError {
            AppError {
                message: $default.to_string(),
                code: $status.as_u16(),
                trace: None,
            }
        }
    };
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AppError {
    pub message: String,
    pub code: u16,
    #[serde(skip)]
    pub trace: Option<String>,
}

#[rustfmt::skip]
pub mod message {
    pub static NOT_FOUND: &str = "The server cannot find the requested resource";
    pub static UNAUTHORIZED: &str = "The request was not successful because it lacks valid authentication credentials";
    pub static UNPROCESSABLE_ENTITY: &str = "The server was unable to process the request because it contains invalid data";
    pub static BAD_REQUEST: &str = "The server would not process the request due to something the server considered to be a client error";
    pub static INTERNAL_ERROR: &str = "The server encountered an unexpected condition that prevented it from fulfilling the request";
}

#[rustfmt::skip]
impl AppError {
    // 1. Errors with Custom Message
    static_error!(Conflict, StatusCode::CONFLICT);
    static_error!(BadRequest, StatusCode::BAD_REQUEST);
    static_error!(UnprocessableEntity, StatusCode::UNPROCESSABLE_ENTITY);
    static_error!(NotFound, StatusCode::NOT_FOUND);

    // 2. Errors with Default Message
    static_error!(Unauthorized, StatusCode::UNAUTHORIZED, message::UNAUTHORIZED);
    static_error!(InternalError, StatusCode::INTERNAL_SERVER_ERROR, message::INTERNAL_ERROR);

    pub fn trace(self, message: &str) -> AppError {
        AppError {
            code: self.code,
            message: self.message,
            trace: Some(message.to_owned()),
        }
    }

    pub fn example_500() -> AppError {
        AppError::InternalError()
    }

    pub fn example_422() -> AppError {
        AppError::UnprocessableEntity(message::UNPROCESSABLE_ENTITY)
    }

    pub fn example_400() -> AppError {
        AppError::BadRequest(message::BAD_REQUEST)
    }

    /// Context handed to the `error` view. The trace only travels outside
    /// production.
    pub fn document(&self, expose_trace: bool) -> Value {
        let mut document = json!({
            "view": "error",
            "title": "Error",
            "message": self.message,
            "code": self.code,
        });

        if expose_trace {
            if let Some(trace) = &self.trace {
                document["error"] = Value::String(trace.to_owned());
            }
        }

        document
    }
}

impl std::error::Error for AppError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message)
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if self.code >= 500 {
            tracing::error!(code = self.code, trace = ?self.trace, "{}", self.message);
        }

        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .json(self.document(*EXPOSE_TRACE))
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(error: surrealdb::Error) -> Self {
        AppError::InternalError().trace(&error.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Database(error) => error.into(),
            RepositoryError::Inconsistent(reason) => AppError::InternalError().trace(&reason),
        }
    }
}

impl From<Argon2Error> for AppError {
    fn from(error: Argon2Error) -> Self {
        match error {
            Password => AppError::Unauthorized(),
            _ => AppError::InternalError().trace(&error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = Map::new();

        collect_errors(&errors, None, &mut map);

        match to_string(&map) {
            Ok(message) => AppError::UnprocessableEntity(message),
            Err(error) => AppError::InternalError().trace(&error.to_string()),
        }
    }
}

/// Keys nested failures by their path, e.g. `location.country`.
fn collect_errors(errors: &ValidationErrors, prefix: Option<&str>, map: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    map.insert(path.clone(), Value::String(error.to_string()));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, Some(&path), map),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, Some(&format!("{path}[{index}]")), map);
                }
            }
        }
    }
}

impl From<UrlencodedError> for AppError {
    fn from(error: UrlencodedError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}
