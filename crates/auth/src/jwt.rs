//! HS256 token signing and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};
use crate::Principal;

/// Verifies bearer tokens and yields their claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// Shared-secret HS256 signer/validator.
pub struct Hs256JwtValidator {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for `principal`, valid for `ttl` from `now`.
    pub fn issue(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Result<String, TokenValidationError> {
        let claims = JwtClaims::for_principal(principal, now, ttl).ok_or_else(|| {
            TokenValidationError::Malformed("cannot issue a token for an anonymous principal".into())
        })?;
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        // Time window checks use our own claim names, not the registered `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use chrono::Duration;

    #[test]
    fn issued_token_validates_and_carries_principal() {
        let jwt = Hs256JwtValidator::new("secret");
        let now = Utc::now();
        let token = jwt
            .issue(&Principal::new("mrsmith", Role::Teacher), now, Duration::minutes(5))
            .unwrap();

        let claims = jwt.validate(&token, now).unwrap();
        assert_eq!(claims.principal(), Principal::new("mrsmith", Role::Teacher));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let now = Utc::now();
        let token = Hs256JwtValidator::new("secret")
            .issue(&Principal::new("a", Role::Admin), now, Duration::minutes(5))
            .unwrap();

        let err = Hs256JwtValidator::new("other").validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    #[test]
    fn expired_token_is_rejected_after_signature_check() {
        let jwt = Hs256JwtValidator::new("secret");
        let now = Utc::now();
        let token = jwt
            .issue(&Principal::new("a", Role::Admin), now, Duration::minutes(5))
            .unwrap();

        let later = now + Duration::minutes(6);
        assert_eq!(jwt.validate(&token, later), Err(TokenValidationError::Expired));
    }
}
