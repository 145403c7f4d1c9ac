use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::{EitherBody, MessageBody},
    cookie::{Cookie, SameSite, time::Duration},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use chrono::Utc;

use crate::api::middlewares::flash::{Flash, FlashMessage};
use crate::api::middlewares::flow::Flow;
use crate::api::views::redirect;
use crate::domain::error::{AppError, AppResult};
use crate::domain::models::account::Account;
use crate::domain::models::jsonwebtoken::AccessToken;
use crate::domain::services::account::AccountService;
use crate::domain::services::jsonwebtoken::JsonWebTokenService;

pub const AUTH_COOKIE: &str = "Authorization";

/// Whether auth cookies are restricted to https.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
}

/// Account behind the request, `None` for anonymous visitors.
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<Account>);

fn service<T: ?Sized + 'static>(req: &ServiceRequest) -> AppResult<Arc<T>> {
    req.app_data::<web::Data<Arc<T>>>()
        .map(|data| Arc::clone(data.get_ref()))
        .ok_or_else(|| {
            AppError::InternalError().trace(&format!(
                "{} is not defined",
                std::any::type_name::<T>()
            ))
        })
}

async fn identify(req: &ServiceRequest) -> AppResult<Option<Account>> {
    let Some(cookie) = req.cookie(AUTH_COOKIE) else {
        return Ok(None);
    };

    let jsonwebtoken_service = service::<dyn JsonWebTokenService>(req)?;

    let claims = match jsonwebtoken_service.validate_token(cookie.value().trim()) {
        Ok(claims) => claims,
        Err(error) if error.code == 401 => {
            tracing::debug!("discarding invalid session token");
            return Ok(None);
        }
        Err(error) => return Err(error),
    };

    service::<dyn AccountService>(req)?
        .find_by_id(&claims.sub)
        .await
}

/// Resolves the session cookie into an [`Identity`] for every request.
pub async fn resolve_identity(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let account = identify(&req).await?;

    req.extensions_mut().insert(Identity(account));

    next.call(req).await
}

pub fn is_admin(account: Option<&Account>) -> bool {
    account.is_some_and(|account| account.is_admin)
}

pub fn admin_gate(req: &HttpRequest) -> AppResult<Flow<()>> {
    let admin = is_admin(
        req.extensions()
            .get::<Identity>()
            .and_then(|identity| identity.0.as_ref()),
    );

    if admin {
        return Ok(Flow::Continue(()));
    }

    Flash::new(req.get_session()).push(FlashMessage::danger("You are not an Admin."))?;

    Ok(Flow::Halt(redirect("/")))
}

/// Scope guard for every admin route.
pub async fn require_admin<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    match admin_gate(req.request())? {
        Flow::Continue(()) => Ok(next.call(req).await?.map_into_left_body()),
        Flow::Halt(response) => Ok(req.into_response(response).map_into_right_body()),
    }
}

pub fn access_cookie(access_token: &AccessToken, secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, access_token.token.to_owned())
        .http_only(true)
        .secure(secure)
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(
            access_token.max_age(Utc::now().timestamp()),
        ))
        .finish()
}

pub fn expired_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(AUTH_COOKIE, "")
        .http_only(true)
        .path("/")
        .finish();

    cookie.make_removal();

    cookie
}
