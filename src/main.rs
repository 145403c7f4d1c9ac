mod api;
mod app;
mod config;
mod container;
mod domain;
mod infrastructure;
mod opentelemetry;
mod services;

use config::{AppConfig, SessionConfig};
use container::{Container, Credentials};
use infrastructure::databases::surrealdb;
use infrastructure::media::cloudinary::CloudinaryMediaService;
use services::jsonwebtoken::KeyPair;

use actix_web::HttpServer;
use actix_web::cookie::Key;
use include_dir::{Dir, include_dir};
use std::fs;
use std::sync::Arc;
use surrealdb_migrations::MigrationRunner;
use thiserror::Error;

#[cfg(test)]
mod tests;

const MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migration");

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] ::surrealdb::Error),
    #[error(transparent)]
    Configuration(#[from] figment::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Migration(String),
    #[error(transparent)]
    OTel(#[from] opentelemetry::OTelError),
    #[error(transparent)]
    JsonWebToken(#[from] jsonwebtoken::errors::Error),
    #[error("{0}: {1}")]
    ReadKey(String, String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("session key must be hex encoded and at least 64 bytes long")]
    SessionKey,
}

async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let provider = opentelemetry::configure(&config.service, &config.logging)?;

    let conn = surrealdb::connect(&config.surrealdb).await?;

    if config.surrealdb.migration {
        MigrationRunner::new(&conn)
            .load_files(&MIGRATIONS_DIR)
            .up()
            .await
            .map_err(|err| AppError::Migration(err.to_string()))?;
    }

    let private_key = read_key(&config.jsonwebtoken.private_keyfile)?;
    let public_key = read_key(&config.jsonwebtoken.public_keyfile)?;

    let credentials = Credentials {
        keys: KeyPair::from_rsa_pem(private_key, public_key)?,
        ttl_hours: config.jsonwebtoken.ttl_hours,
        cookie_secure: config.session.cookie_secure,
        session_key: session_key(&config.session)?,
    };

    let media_service = Arc::new(CloudinaryMediaService::new(&config.media)?);

    let container = Arc::new(Container::new(conn, credentials, media_service));

    tracing::info!(
        host = %config.service.host,
        port = config.service.port,
        "listening"
    );

    HttpServer::new(move || app::create(Arc::clone(&container)))
        .bind((config.service.host.as_str(), config.service.port))?
        .run()
        .await?;

    opentelemetry::shutdown(provider)?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn read_key(keyfile: &str) -> Result<Vec<u8>, AppError> {
    fs::read(keyfile).map_err(|err| AppError::ReadKey(err.to_string(), keyfile.to_string()))
}

fn session_key(session: &SessionConfig) -> Result<Key, AppError> {
    if session.key.is_empty() {
        tracing::warn!("no session key configured, flash messages will not survive a restart");
        return Ok(Key::generate());
    }

    let bytes = hex::decode(session.key.trim()).map_err(|_| AppError::SessionKey)?;

    Key::try_from(bytes.as_slice()).map_err(|_| AppError::SessionKey)
}
