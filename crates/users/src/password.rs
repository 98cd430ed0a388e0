//! Salted password digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hex-encoded salt and SHA-256 digest of `salt || password`.
///
/// The plain password never leaves the registration command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    salt: String,
    digest: String,
}

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn new(password: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::random();
        Self::with_salt(&salt, password)
    }

    fn with_salt(salt: &[u8], password: &str) -> Self {
        Self {
            salt: hex::encode(salt),
            digest: hex::encode(digest(salt, password)),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        hex::encode(digest(&salt, password)) == self.digest
    }
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_original_password_only() {
        let hash = PasswordHash::new("s3cret-pass");
        assert!(hash.verify("s3cret-pass"));
        assert!(!hash.verify("s3cret-pasS"));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(PasswordHash::new("password1"), PasswordHash::new("password1"));
    }

    #[test]
    fn fixed_salt_is_deterministic() {
        let a = PasswordHash::with_salt(b"salt", "password1");
        let b = PasswordHash::with_salt(b"salt", "password1");
        assert_eq!(a, b);
    }
}
