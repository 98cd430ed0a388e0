use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Principal, Role, Username};

/// JWT claims model (transport-agnostic).
///
/// This is the minimal set of claims expected once a token has been decoded and
/// its signature verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the username.
    pub sub: Username,

    /// Role granted at registration.
    pub role: Role,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Claims for an authenticated principal; `None` for anonymous callers.
    pub fn for_principal(
        principal: &Principal,
        issued_at: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Option<Self> {
        Some(Self {
            sub: principal.username().clone(),
            role: principal.role()?,
            issued_at,
            expires_at: issued_at + ttl,
        })
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.sub.clone(), self.role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("malformed or unsigned token: {0}")]
    Malformed(String),
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification lives in
/// [`crate::jwt`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_offset_min: i64, ttl_min: i64) -> (JwtClaims, DateTime<Utc>) {
        let now = Utc::now();
        let issued_at = now + Duration::minutes(issued_offset_min);
        (
            JwtClaims {
                sub: Username::new("alice"),
                role: Role::Student,
                issued_at,
                expires_at: issued_at + Duration::minutes(ttl_min),
            },
            now,
        )
    }

    #[test]
    fn fresh_token_is_valid() {
        let (c, now) = claims(-1, 10);
        assert_eq!(validate_claims(&c, now), Ok(()));
    }

    #[test]
    fn expired_token_is_rejected() {
        let (c, now) = claims(-20, 10);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_token_is_rejected() {
        let (c, now) = claims(5, 10);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let (c, now) = claims(-1, -5);
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::InvalidTimeWindow));
    }
}
