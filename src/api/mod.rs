use actix_web::middleware::from_fn;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

use crate::api::error::ApiResult;
use crate::api::middlewares::auth::require_admin;
use crate::domain::error::{AppError, message};

mod controllers;
mod dto;
mod error;
pub mod middlewares;
mod views;

pub fn routes(cfg: &mut ServiceConfig) {
    controllers::hotel::routes(cfg);
    controllers::account::routes(cfg);

    cfg.service(
        scope("/admin")
            .wrap(from_fn(require_admin))
            .configure(controllers::admin::routes),
    );
}

pub async fn not_found() -> ApiResult {
    Err(AppError::NotFound(message::NOT_FOUND))
}
