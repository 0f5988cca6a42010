//! Salted credential digests.
//!
//! Credentials are never kept in plaintext. Each identity stores a random
//! 16-byte salt and `SHA-256(salt || credential)`, both hex encoded; a login
//! attempt recomputes the digest with the stored salt and compares.
//!
//! This is tamper-evidence for an in-memory demo, not a password hashing
//! scheme: there is no work factor.

use sha2::{Digest, Sha256};

use stroke_contracts::error::StrokeResult;

use crate::token::fill_random;

const SALT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDigest {
    salt: String,
    digest: String,
}

impl CredentialDigest {
    /// Digest `credential` under a fresh random salt.
    pub fn new(credential: &str) -> StrokeResult<Self> {
        let mut salt = [0u8; SALT_LEN];
        fill_random(&mut salt)?;
        let salt = hex::encode(salt);
        let digest = digest(&salt, credential);
        Ok(Self { salt, digest })
    }

    /// True when `credential` is exactly the string this digest was built from.
    pub fn matches(&self, credential: &str) -> bool {
        let candidate = digest(&self.salt, credential);
        // Both sides are fixed-length hex; compare without early exit.
        candidate
            .bytes()
            .zip(self.digest.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(salt: &str, credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(credential.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_original_credential() {
        let digest = CredentialDigest::new("p1").unwrap();
        assert!(digest.matches("p1"));
        assert!(!digest.matches("p2"));
        assert!(!digest.matches("P1"));
        assert!(!digest.matches(""));
    }

    #[test]
    fn same_credential_gets_different_salts() {
        let a = CredentialDigest::new("secret").unwrap();
        let b = CredentialDigest::new("secret").unwrap();
        assert_ne!(a, b);
        assert!(a.matches("secret") && b.matches("secret"));
    }

    #[test]
    fn plaintext_is_not_retained() {
        let digest = CredentialDigest::new("hunter2").unwrap();
        assert!(!format!("{:?}", digest).contains("hunter2"));
    }
}
