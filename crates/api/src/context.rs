use chrono::{DateTime, Utc};

use blueprint_auth::{JwtClaims, Principal};

/// Authenticated caller of a request, derived from a verified bearer token.
///
/// Inserted into request extensions by the auth middleware and immutable from
/// then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

impl PrincipalContext {
    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self {
            principal: claims.principal(),
            expires_at: claims.expires_at,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
