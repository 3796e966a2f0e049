use anyhow::{anyhow, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use streamsphere_common::{get_current_timestamp, hmac_sha256_hex, verify_hmac_sha256_hex};

use crate::User;

pub const AUTH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
const CLOCK_SKEW_SECS: i64 = 60;

/// Identity carried by a bearer token: `base64url(claims).hex(hmac(claims))`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: String,
    pub timestamp: i64,
}

impl SessionClaims {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: get_current_timestamp(),
        }
    }

    pub fn sign(&self, secret: &str) -> Result<String> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?);
        let signature = hmac_sha256_hex(secret.as_bytes(), payload.as_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    pub fn verify(token: &str, secret: &str) -> Result<Self> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| anyhow!("malformed session token"))?;

        if !verify_hmac_sha256_hex(secret.as_bytes(), payload.as_bytes(), signature) {
            return Err(anyhow!("invalid session token"));
        }

        let claims: Self = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload)?)?;
        let now = get_current_timestamp();
        if claims.timestamp < now - AUTH_TOKEN_TTL_SECS {
            return Err(anyhow!("session token expired"));
        }
        if claims.timestamp > now + CLOCK_SKEW_SECS {
            return Err(anyhow!("session token issued in the future"));
        }
        if claims.user_id.is_empty() {
            return Err(anyhow!("session token without user"));
        }
        Ok(claims)
    }
}

impl User {
    pub fn generate_auth_token(&self, secret: &str) -> Result<String> {
        SessionClaims::new(self.id.clone()).sign(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() -> Result<()> {
        let user = User::new("u1", "A", "a@x.com");
        let token = user.generate_auth_token("salt")?;
        let claims = SessionClaims::verify(&token, "salt")?;
        assert_eq!(claims.user_id, "u1");
        Ok(())
    }

    #[test]
    fn test_rejects_other_secret_and_tampering() -> Result<()> {
        let token = SessionClaims::new("u1").sign("salt")?;
        assert!(SessionClaims::verify(&token, "pepper").is_err());

        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&SessionClaims::new("u2"))?);
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", forged_payload, signature);
        assert!(SessionClaims::verify(&forged, "salt").is_err());

        assert!(SessionClaims::verify("garbage", "salt").is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_expired() -> Result<()> {
        let claims = SessionClaims {
            user_id: "u1".into(),
            timestamp: get_current_timestamp() - AUTH_TOKEN_TTL_SECS - 10,
        };
        let token = claims.sign("salt")?;
        assert!(SessionClaims::verify(&token, "salt").is_err());
        Ok(())
    }
}
