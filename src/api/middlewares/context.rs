use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ok};

use crate::api::middlewares::auth::Identity;
use crate::api::middlewares::flash::Flash;
use crate::domain::error::AppError;
use crate::domain::models::account::Account;

/// Per-request state handed explicitly to handlers: who is asking, where,
/// and the flash carrier for the next render.
pub struct RequestContext {
    pub identity: Option<Account>,
    pub url: String,
    pub flash: Flash,
}

impl FromRequest for RequestContext {
    type Error = AppError;
    type Future = Ready<Result<RequestContext, AppError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Identity>()
            .and_then(|identity| identity.0.clone());

        ok(RequestContext {
            identity,
            url: req.path().to_string(),
            flash: Flash::new(req.get_session()),
        })
    }
}
