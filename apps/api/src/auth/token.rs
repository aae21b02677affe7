//! Signed session tokens: `base64url(claims json) "." hex(hmac-sha256)`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use crate::models::user::Role;

type HmacSha256 = Hmac<Sha256>;

/// Seven days, matching the cookie Max-Age.
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    /// Expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take keys of any size")
    }

    /// Issues a token for `user_id` valid for `TOKEN_TTL_SECS` from `now`.
    pub fn issue(&self, user_id: Uuid, role: Role, now: i64) -> String {
        self.sign(&Claims {
            user_id,
            role,
            exp: now + TOKEN_TTL_SECS,
        })
    }

    pub fn sign(&self, claims: &Claims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims always serialize to JSON");
        let payload = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        format!("{payload}.{signature}")
    }

    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| TokenError::Malformed)?;

        // verify_slice compares in constant time
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= now {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
