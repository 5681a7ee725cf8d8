use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::application::ports::admin_auth::AdminAuth;

/// Admin gate backed by a single shared password from configuration.
///
/// Only the SHA-256 digest of the password is kept in memory, and digests are
/// compared without early exit so timing does not reveal a matching prefix.
pub struct StaticPasswordAdminAuth {
    digest: [u8; 32],
}

impl StaticPasswordAdminAuth {
    pub fn new(password: &SecretString) -> Self {
        Self {
            digest: digest(password.expose_secret()),
        }
    }
}

impl AdminAuth for StaticPasswordAdminAuth {
    fn verify(&self, secret: &str) -> bool {
        let candidate = digest(secret);
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}
