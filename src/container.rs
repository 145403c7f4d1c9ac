use std::sync::Arc;

use actix_web::cookie::Key;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::repositories::account::AccountRepository;
use crate::domain::repositories::hotel::HotelRepository;
use crate::domain::services::account::AccountService;
use crate::domain::services::hotel::HotelService;
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use crate::domain::services::media::MediaService;

use crate::services::account::AccountServiceImpl;
use crate::services::hotel::HotelServiceImpl;
use crate::services::jsonwebtoken::{JsonWebTokenServiceImpl, KeyPair};

use crate::infrastructure::repositories::account::AccountRepositoryImpl;
use crate::infrastructure::repositories::hotel::HotelRepositoryImpl;

pub struct Container {
    pub account_service: Arc<dyn AccountService>,
    pub hotel_service: Arc<dyn HotelService>,
    pub jsonwebtoken_service: Arc<dyn JsonWebTokenService>,
    pub media_service: Arc<dyn MediaService>,
    pub cookie_secure: bool,
    pub session_key: Key,
}

/// Credential settings shared by every container flavour.
pub struct Credentials {
    pub keys: KeyPair,
    pub ttl_hours: i64,
    pub cookie_secure: bool,
    pub session_key: Key,
}

impl Container {
    pub fn new(
        conn: Surreal<Client>,
        credentials: Credentials,
        media_service: Arc<dyn MediaService>,
    ) -> Self {
        let db = Arc::new(conn);

        Container::from_repositories(
            Arc::new(AccountRepositoryImpl::new(db.clone())),
            Arc::new(HotelRepositoryImpl::new(db)),
            credentials,
            media_service,
        )
    }

    pub fn from_repositories(
        account_repository: Arc<dyn AccountRepository>,
        hotel_repository: Arc<dyn HotelRepository>,
        credentials: Credentials,
        media_service: Arc<dyn MediaService>,
    ) -> Self {
        Container {
            account_service: Arc::new(AccountServiceImpl::new(account_repository)),
            hotel_service: Arc::new(HotelServiceImpl::new(hotel_repository)),
            jsonwebtoken_service: jsonwebtoken_service(credentials.keys, credentials.ttl_hours),
            media_service,
            cookie_secure: credentials.cookie_secure,
            session_key: credentials.session_key,
        }
    }
}

fn jsonwebtoken_service(keys: KeyPair, ttl_hours: i64) -> Arc<dyn JsonWebTokenService> {
    Arc::new(JsonWebTokenServiceImpl::new(keys, ttl_hours))
}
