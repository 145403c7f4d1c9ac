use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use once_cell::sync::Lazy;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;

use crate::domain::models::jsonwebtoken::Claims;
use crate::services::jsonwebtoken::KeyPair;

static KEYPAIR: Lazy<KeyPair> = Lazy::new(fresh_keypair);

/// Shared RSA pair; generating one per test is slow.
pub fn generate_keypair() -> KeyPair {
    KEYPAIR.clone()
}

/// A pair nobody else signs with.
pub fn fresh_keypair() -> KeyPair {
    let rsa = Rsa::generate(2048).unwrap();
    let pkey = PKey::from_rsa(rsa).unwrap();
    let private_key = pkey.private_key_to_pem_pkcs8().unwrap();
    let public_key = pkey.public_key_to_pem().unwrap();

    KeyPair::from_rsa_pem(private_key, public_key).unwrap()
}

/// Well-formed, unexpired token signed with a shared secret instead of RSA.
pub fn hs256_token(sub: &str) -> String {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"lets-travel-shared-secret"),
    )
    .unwrap()
}
