use std::sync::Arc;

use crate::api::dto::account::{CredentialsDTO, SignUpDTO};
use crate::api::dto::validation::{FieldError, sign_up_failures};
use crate::api::error::ApiResult;
use crate::api::middlewares::auth::{CookiePolicy, access_cookie, expired_cookie};
use crate::api::middlewares::context::RequestContext;
use crate::api::middlewares::flash::FlashMessage;
use crate::api::views::{View, redirect};
use crate::domain::error::AppError;
use crate::domain::models::account::Account;
use crate::domain::services::account::AccountService;
use crate::domain::services::jsonwebtoken::JsonWebTokenService;

use actix_web::{
    HttpResponse, get,
    http::{StatusCode, header},
    post,
    web::{Data as State, Form},
};

use utoipa_actix_web::service_config::ServiceConfig;

const ACCOUNT_EXISTS: &str = "Account already exists";

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(sign_up_get)
        .service(sign_up_post)
        .service(login_get)
        .service(login_post)
        .service(logout);
}

/// Issues the session cookie and sends the visitor home.
fn start_session(
    ctx: &RequestContext,
    account: &Account,
    jsonwebtoken_service: &dyn JsonWebTokenService,
    policy: &CookiePolicy,
) -> ApiResult {
    let access_token = jsonwebtoken_service.generate_token(account.id.to_owned())?;

    ctx.flash
        .push(FlashMessage::success("You are now logged in"))?;

    tracing::info!(account = %account.id, "session started");

    Ok(HttpResponse::Found()
        .cookie(access_cookie(&access_token, policy.secure))
        .insert_header((header::LOCATION, "/"))
        .finish())
}

#[utoipa::path(
    responses((status = 200, description = "View `sign_up`")),
    tag = "Account",
)]
#[get("/sign-up")]
pub async fn sign_up_get(ctx: RequestContext) -> ApiResult {
    View::new("sign_up", "Sign me Up!").render(&ctx)
}

#[utoipa::path(
    request_body(content = SignUpDTO, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created and logged in, redirected to `/`"),
        (status = 409, body = [FieldError], description = "View `sign_up`, the email is taken"),
        (status = 422, body = [FieldError], description = "View `sign_up` listing every failed check"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Account",
)]
#[post("/sign-up")]
pub async fn sign_up_post(
    ctx: RequestContext,
    payload: Form<SignUpDTO>,
    account_service: State<Arc<dyn AccountService>>,
    jsonwebtoken_service: State<Arc<dyn JsonWebTokenService>>,
    policy: State<CookiePolicy>,
) -> ApiResult {
    let sign_up = payload.into_inner();

    let failures = sign_up_failures(&sign_up);

    if !failures.is_empty() {
        return View::new("sign_up", "Please fix the Errors:")
            .status(StatusCode::UNPROCESSABLE_ENTITY)
            .with("errors", &failures)?
            .render(&ctx);
    }

    let account = match account_service.signup(sign_up.sanitized()).await {
        Ok(account) => account,
        Err(error) if error.code == StatusCode::CONFLICT.as_u16() => {
            return View::new("sign_up", "Sign me Up!")
                .status(StatusCode::CONFLICT)
                .with(
                    "errors",
                    &[FieldError {
                        field: "email",
                        message: ACCOUNT_EXISTS,
                    }],
                )?
                .render(&ctx);
        }
        Err(error) => return Err(error),
    };

    start_session(&ctx, &account, jsonwebtoken_service.get_ref().as_ref(), &policy)
}

#[utoipa::path(
    responses((status = 200, description = "View `login`")),
    tag = "Account",
)]
#[get("/login")]
pub async fn login_get(ctx: RequestContext) -> ApiResult {
    View::new("login", "Login").render(&ctx)
}

#[utoipa::path(
    request_body(content = CredentialsDTO, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirected to `/` when logged in, back to `/login` otherwise"),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Account",
)]
#[post("/login")]
pub async fn login_post(
    ctx: RequestContext,
    payload: Form<CredentialsDTO>,
    account_service: State<Arc<dyn AccountService>>,
    jsonwebtoken_service: State<Arc<dyn JsonWebTokenService>>,
    policy: State<CookiePolicy>,
) -> ApiResult {
    match account_service.signin(payload.into_inner().into()).await {
        Ok(account) => {
            start_session(&ctx, &account, jsonwebtoken_service.get_ref().as_ref(), &policy)
        }
        Err(error) if error.code == StatusCode::UNAUTHORIZED.as_u16() => {
            ctx.flash
                .push(FlashMessage::danger("Login Failed, try again"))?;
            Ok(redirect("/login"))
        }
        Err(error) => Err(error),
    }
}

#[utoipa::path(
    responses((status = 302, description = "Session cookie expired, redirected to `/`")),
    tag = "Account",
)]
#[get("/logout")]
pub async fn logout(ctx: RequestContext) -> ApiResult {
    ctx.flash.push("You are now Logged out.")?;

    Ok(HttpResponse::Found()
        .cookie(expired_cookie())
        .insert_header((header::LOCATION, "/"))
        .finish())
}

#[cfg(test)]
mod tests {

    use actix_web::{
        cookie::Cookie,
        dev::ServiceResponse,
        http::header::ContentType,
        test::{self, TestRequest},
    };
    use rstest::*;
    use serde_json::{Value, json};

    use crate::app;
    use crate::container::Container;
    use crate::tests::utils::mock::{self, pending_flash, session_cookie};

    use super::*;

    const SIGN_UP: &str = "first_name=Grace&surname=Hopper&email=Grace%40Navy.mil&confirm_email=Grace%40Navy.mil&password=c0b0l!&confirm_password=c0b0l!";

    #[fixture]
    fn container() -> Container {
        mock::container(mock::accounts(), Vec::new())
    }

    fn access<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "Authorization")
            .map(|cookie| cookie.into_owned())
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_form(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::get().uri("/sign-up").send_request(&app).await;
        let view: Value = test::read_body_json(res).await;

        assert_eq!(view["view"], "sign_up");
        assert_eq!(view["title"], "Sign me Up!");
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_logs_in(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(SIGN_UP)
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");

        let token = access(&res).unwrap();
        let session = session_cookie(&res).unwrap();

        let res = TestRequest::get()
            .uri("/login")
            .cookie(token)
            .cookie(session)
            .send_request(&app)
            .await;
        let view: Value = test::read_body_json(res).await;

        assert_eq!(view["user"]["email"], "grace@navy.mil");
        assert_eq!(view["user"]["is_admin"], false);
        assert_eq!(
            view["flash"],
            json!([{"category": "success", "message": "You are now logged in"}])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_collects_every_failure(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("first_name=Grace&surname=&email=grace%40navy.mil&confirm_email=other%40navy.mil&password=c0b&confirm_password=c0b")
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(access(&res).is_none());

        let view: Value = test::read_body_json(res).await;

        assert_eq!(view["title"], "Please fix the Errors:");
        assert_eq!(
            view["errors"],
            json!([
                {"field": "surname", "message": "Surname must be specified."},
                {"field": "surname", "message": "Surname must be Alphanumeric"},
                {"field": "confirm_email", "message": "E-Mail does not match!"},
                {"field": "password", "message": "Password must be min. 6 characters!"}
            ])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_keeps_apostrophe_email(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(SIGN_UP.replace("Grace%40Navy.mil", "O%27Brien%40lets-travel.com"))
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::FOUND);

        let res = TestRequest::post()
            .uri("/login")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("email=o%27brien%40lets-travel.com&password=c0b0l!")
            .send_request(&app)
            .await;

        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");

        let res = TestRequest::get()
            .uri("/login")
            .cookie(access(&res).unwrap())
            .send_request(&app)
            .await;
        let view: Value = test::read_body_json(res).await;

        assert_eq!(view["user"]["email"], "o'brien@lets-travel.com");
    }

    #[rstest]
    #[case::first_name("first_name=Grace", "first_name", "First Name must not exceed 30 characters.")]
    #[case::surname("surname=Hopper", "surname", "Surname must not exceed 30 characters.")]
    #[actix_web::test]
    async fn test_sign_up_rejects_long_names(
        container: Container,
        #[case] pair: &str,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let app = test::init_service(app::create(container.into())).await;

        let long = format!("{field}={}", "G".repeat(31));

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(SIGN_UP.replace(pair, &long))
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(access(&res).is_none());

        let view: Value = test::read_body_json(res).await;
        assert_eq!(view["errors"], json!([{"field": field, "message": message}]));
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_mismatch_creates_nothing(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(SIGN_UP.replace("confirm_password=c0b0l!", "confirm_password=c0b0l?"))
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = TestRequest::post()
            .uri("/login")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("email=grace%40navy.mil&password=c0b0l!")
            .send_request(&app)
            .await;

        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[rstest]
    #[actix_web::test]
    async fn test_sign_up_twice(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/sign-up")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(SIGN_UP.replace("Grace%40Navy.mil", "ADA%40lets-travel.com"))
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);

        let view: Value = test::read_body_json(res).await;
        assert_eq!(view["errors"][0]["message"], "Account already exists");
    }

    #[rstest]
    #[actix_web::test]
    async fn test_login(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/login")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("email=ada%40lets-travel.com&password=p4ssw0rd")
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");

        let token = access(&res).unwrap();
        assert_eq!(token.http_only(), Some(true));
        assert_eq!(token.path(), Some("/"));
    }

    #[rstest]
    #[case::wrong_password("email=ada%40lets-travel.com&password=nope")]
    #[case::unknown_email("email=nobody%40lets-travel.com&password=p4ssw0rd")]
    #[case::malformed_email("email=not-an-email&password=p4ssw0rd")]
    #[case::empty_form("")]
    #[actix_web::test]
    async fn test_login_failure(container: Container, #[case] body: &'static str) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::post()
            .uri("/login")
            .insert_header(ContentType::form_url_encoded())
            .set_payload(body)
            .send_request(&app)
            .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
        assert!(access(&res).is_none());

        let flash = pending_flash(&app, session_cookie(&res).unwrap()).await;
        assert_eq!(
            flash,
            json!([{"category": "danger", "message": "Login Failed, try again"}])
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn test_logout_expires_cookie(container: Container) {
        let app = test::init_service(app::create(container.into())).await;

        let res = TestRequest::get().uri("/logout").send_request(&app).await;

        assert_eq!(res.status(), StatusCode::FOUND);

        let token = access(&res).unwrap();
        assert_eq!(token.value(), "");
        assert_eq!(token.max_age(), Some(actix_web::cookie::time::Duration::ZERO));

        let flash = pending_flash(&app, session_cookie(&res).unwrap()).await;
        assert_eq!(
            flash,
            json!([{"category": "info", "message": "You are now Logged out."}])
        );
    }
}
