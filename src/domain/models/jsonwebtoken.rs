use serde::{Deserialize, Serialize};

/// Signed session token handed to the browser in the `Authorization` cookie.
pub struct AccessToken {
    pub token: String,
    pub expiration: i64,
}

/// `sub` carries the account id the session belongs to.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

impl AccessToken {
    pub fn max_age(&self, now: i64) -> i64 {
        (self.expiration - now).max(0)
    }
}
