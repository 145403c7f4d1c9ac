use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

const PRODUCTION: &str = "production";

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub surrealdb: SurrealDbConfig,
    pub jsonwebtoken: JsonWebTokenConfig,
    pub session: SessionConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct JsonWebTokenConfig {
    pub public_keyfile: String,
    pub private_keyfile: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: String,
    pub otlp: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SurrealDbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub migration: bool,
}

/// Cookie session holding pending flash messages.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Hex encoded signing key, at least 64 bytes once decoded. Empty means
    /// a fresh key per process.
    pub key: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MediaConfig {
    pub endpoint: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_seconds: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(AppConfig {
                service: ServiceConfig {
                    name: "hotel-listings".to_string(),
                    host: "127.0.0.1".to_string(),
                    port: 3000,
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                    otlp: false,
                },
                jsonwebtoken: JsonWebTokenConfig {
                    public_keyfile: "config/public_key.pem".to_string(),
                    private_keyfile: "config/private_key.pem".to_string(),
                    ttl_hours: 24,
                },
                surrealdb: SurrealDbConfig {
                    host: "localhost".to_string(),
                    port: 8000,
                    username: "root".to_string(),
                    password: "root".to_string(),
                    namespace: "travel".to_string(),
                    database: "hotels".to_string(),
                    migration: true,
                },
                session: SessionConfig {
                    key: String::new(),
                    cookie_secure: false,
                },
                media: MediaConfig {
                    endpoint: "https://api.cloudinary.com/v1_1".to_string(),
                    cloud_name: String::new(),
                    api_key: String::new(),
                    api_secret: String::new(),
                    timeout_seconds: 30,
                },
            }))
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file(format!("config/{}.toml", environment())))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()
    }
}

pub fn environment() -> String {
    std::env::var("RUST_ENV").unwrap_or("development".to_string())
}

pub fn is_production() -> bool {
    environment() == PRODUCTION
}
