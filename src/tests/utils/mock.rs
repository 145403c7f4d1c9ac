use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::{Service, ServiceResponse},
    test::{self, TestRequest},
};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::api::middlewares::auth::AUTH_COOKIE;
use crate::app::{self, SESSION_COOKIE};
use crate::container::{Container, Credentials};
use crate::domain::models::account::Account;
use crate::domain::models::hotel::Hotel;
use crate::infrastructure::media::cloudinary::mock::MediaServiceImpl;
use crate::infrastructure::repositories::account::mock::AccountRepositoryImpl;
use crate::infrastructure::repositories::hotel::mock::HotelRepositoryImpl;
use crate::services::account::encrypt_password;
use crate::tests::utils::crypto::generate_keypair;

pub const PASSWORD: &str = "p4ssw0rd";

const BOUNDARY: &str = "----lets-travel-boundary";

static PASSWORD_HASH: Lazy<String> = Lazy::new(|| encrypt_password(PASSWORD).unwrap());

pub fn session_key() -> Key {
    Key::from(&[7u8; 64])
}

pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    app::session_middleware(session_key(), false)
}

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

fn account(id: &str, first_name: &str, surname: &str, is_admin: bool) -> Account {
    Account {
        id: id.to_string(),
        first_name: first_name.to_string(),
        surname: surname.to_string(),
        email: format!("{}@lets-travel.com", first_name.to_lowercase()),
        password: PASSWORD_HASH.clone(),
        is_admin,
    }
}

/// Ada administers the site, Grace only browses it.
pub fn accounts() -> Vec<Account> {
    vec![
        account("1", "Ada", "Lovelace", true),
        account("2", "Grace", "Hopper", false),
    ]
}

pub fn credentials() -> Credentials {
    Credentials {
        keys: generate_keypair(),
        ttl_hours: 24,
        cookie_secure: false,
        session_key: session_key(),
    }
}

pub fn container(accounts: Vec<Account>, hotels: Vec<Hotel>) -> Container {
    container_with_media(accounts, hotels, Arc::new(MediaServiceImpl::working()))
}

pub fn container_with_media(
    accounts: Vec<Account>,
    hotels: Vec<Hotel>,
    media: Arc<MediaServiceImpl>,
) -> Container {
    Container::from_repositories(
        Arc::new(AccountRepositoryImpl::with(accounts)),
        Arc::new(HotelRepositoryImpl::with(hotels)),
        credentials(),
        media,
    )
}

pub fn auth_cookie(container: &Container, account_id: &str) -> Cookie<'static> {
    let access_token = container
        .jsonwebtoken_service
        .generate_token(account_id.to_string())
        .unwrap();

    Cookie::new(AUTH_COOKIE, access_token.token)
}

/// Flash messages waiting in `session`, as the next rendered view sees them.
pub async fn pending_flash<S, B>(app: &S, session: Cookie<'static>) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = TestRequest::get()
        .uri("/login")
        .cookie(session)
        .send_request(app)
        .await;

    let view: Value = test::read_body_json(res).await;

    view["flash"].clone()
}

/// Builds a `multipart/form-data` body; file parts are sent as jpeg.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
