use crate::domain::error::{AppError, AppResult};
use crate::domain::models::jsonwebtoken::{AccessToken, Claims};
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JsonWebTokenError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

#[derive(Clone)]
pub struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    pub fn from_rsa_pem(
        private_key: Vec<u8>,
        public_key: Vec<u8>,
    ) -> Result<Self, JsonWebTokenError> {
        Ok(KeyPair {
            encoding: EncodingKey::from_rsa_pem(&private_key)?,
            decoding: DecodingKey::from_rsa_pem(&public_key)?,
        })
    }
}

pub struct JsonWebTokenServiceImpl {
    keys: KeyPair,
    ttl: Duration,
}

impl JsonWebTokenServiceImpl {
    pub fn new(keys: KeyPair, ttl_hours: i64) -> Self {
        JsonWebTokenServiceImpl {
            keys,
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }
}

impl JsonWebTokenService for JsonWebTokenServiceImpl {
    fn generate_token(&self, account_id: String) -> AppResult<AccessToken> {
        let now = Utc::now();

        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError().trace("token expiration overflow"))?
            .timestamp();

        let iat = now.timestamp();

        let claims = Claims {
            sub: account_id,
            exp: expiration as usize,
            iat: iat as usize,
        };

        let header = Header::new(Algorithm::RS256);

        let token = encode(&header, &claims, &self.keys.encoding)
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;

        Ok(AccessToken { token, expiration })
    }

    fn validate_token(&self, token: &str) -> AppResult<Claims> {
        match decode::<Claims>(
            token,
            &self.keys.decoding,
            &Validation::new(Algorithm::RS256),
        ) {
            Ok(token) => Ok(token.claims),
            // Only a broken server key is our fault, anything else is a bad token.
            Err(error) => match error.kind() {
                ErrorKind::InvalidRsaKey(_)
                | ErrorKind::InvalidEcdsaKey
                | ErrorKind::InvalidKeyFormat
                | ErrorKind::RsaFailedSigning
                | ErrorKind::Crypto(_) => {
                    Err(AppError::InternalError().trace(&format!("{error:?}")))
                }
                _ => Err(AppError::Unauthorized()),
            },
        }
    }
}
