
pub mod utils;

use ::surrealdb::{Surreal, engine::remote::ws::Client};

use std::sync::Arc;

use surrealdb_migrations::MigrationRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::{
    surrealdb::{SURREALDB_PORT, SurrealDb},
    testcontainers::runners::AsyncRunner,
};

use crate::infrastructure::media::cloudinary::mock::MediaServiceImpl;
use crate::tests::utils::mock;
use crate::{MIGRATIONS_DIR, infrastructure::databases::surrealdb};
use crate::{config::AppConfig, container::Container};

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header::ContentType,
    test::TestRequest,
};

use rstest::*;

use crate::api::middlewares::auth::AUTH_COOKIE;

struct Database {
    pub connection: Surreal<Client>,
    pub container: ContainerAsync<SurrealDb>,
}

pub struct TestContext {
    pub db: Database,
    pub container: Arc<Container>,
}

#[fixture]
async fn context() -> TestContext {
    let db_container = SurrealDb::default()
        .with_tag("latest")
        .start()
        .await
        .unwrap();

    let mut config = AppConfig::load().unwrap();

    config.surrealdb.port = db_container
        .get_host_port_ipv4(SURREALDB_PORT)
        .await
        .unwrap();

    let db_connection = surrealdb::connect(&config.surrealdb).await.unwrap();

    MigrationRunner::new(&db_connection)
        .load_files(&MIGRATIONS_DIR)
        .up()
        .await
        .unwrap();

    let db = Database {
        connection: db_connection.clone(),
        container: db_container,
    };

    let container = Arc::new(Container::new(
        db_connection,
        mock::credentials(),
        Arc::new(MediaServiceImpl::working()),
    ));

    TestContext { db, container }
}

/// Logs in through the form and returns the issued `Authorization` cookie.
async fn login<S, B>(app: &S, email: &str, password: &str) -> Option<Cookie<'static>>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = TestRequest::post()
        .uri("/login")
        .insert_header(ContentType::form_url_encoded())
        .set_payload(format!("email={email}&password={password}"))
        .send_request(app)
        .await;

    res.response()
        .cookies()
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(Cookie::into_owned)
}
