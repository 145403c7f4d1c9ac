//! View documents handed to the template layer.
//!
//! Every render carries the request locals (`user`, `url`, `flash`) next to
//! the handler's own data, so templates never reach back into the session.

use actix_web::{
    HttpResponse,
    http::{StatusCode, header, header::ContentType},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::dto::account::AccountView;
use crate::api::error::ApiResult;
use crate::api::middlewares::context::RequestContext;
use crate::domain::error::AppError;

pub struct View {
    name: &'static str,
    title: String,
    status: StatusCode,
    data: Map<String, Value>,
}

impl View {
    pub fn new(name: &'static str, title: impl Into<String>) -> Self {
        View {
            name,
            title: title.into(),
            status: StatusCode::OK,
            data: Map::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(value)
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;

        self.data.insert(key.to_string(), value);

        Ok(self)
    }

    /// Consumes the pending flash messages of the request.
    pub fn render(self, ctx: &RequestContext) -> ApiResult {
        let mut document = Map::new();

        document.insert("view".into(), Value::String(self.name.into()));
        document.insert("title".into(), Value::String(self.title));
        document.insert(
            "user".into(),
            serde_json::to_value(ctx.identity.as_ref().map(AccountView::from))
                .map_err(|err| AppError::InternalError().trace(&err.to_string()))?,
        );
        document.insert("url".into(), Value::String(ctx.url.to_owned()));
        document.insert(
            "flash".into(),
            serde_json::to_value(ctx.flash.take()?)
                .map_err(|err| AppError::InternalError().trace(&err.to_string()))?,
        );
        document.extend(self.data);

        Ok(HttpResponse::build(self.status)
            .content_type(ContentType::json())
            .json(Value::Object(document)))
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
