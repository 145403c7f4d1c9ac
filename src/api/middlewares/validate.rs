use core::fmt::Debug;
use std::ops::Deref;

use crate::domain::error::AppError;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::{Payload, UrlEncoded};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Url-encoded form body, validated before the handler sees it.
#[derive(Debug)]
pub struct Form<T>(pub T);

impl<T> Form<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Form<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for Form<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        UrlEncoded::new(req, payload)
            .limit(32768)
            .map(|res: Result<T, _>| match res {
                Ok(payload) => payload
                    .validate()
                    .map(|_| Form(payload))
                    .map_err(AppError::from),
                Err(err) => Err(AppError::from(err)),
            })
            .boxed_local()
    }
}
