//! Salted SHA-256 password digests for locally registered accounts.
//!
//! Each account gets its own random salt. Only the salt and digest are
//! persisted; the password itself never reaches storage.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Size of the per-account salt in bytes
const SALT_SIZE: usize = 16;

/// Hashes `password` with a fresh random salt.
///
/// # Returns
/// `(digest, salt)`, both base64-encoded for storage
pub fn hash_password(password: &str) -> (String, String) {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);

    let digest = digest(password, &salt);
    (BASE64.encode(digest), BASE64.encode(salt))
}

/// Checks `password` against a stored digest and salt.
///
/// Returns false if the stored values are not valid base64.
pub fn verify_password(password: &str, digest_b64: &str, salt_b64: &str) -> bool {
    let (Ok(expected), Ok(salt)) = (BASE64.decode(digest_b64), BASE64.decode(salt_b64)) else {
        return false;
    };

    let actual = digest(password, &salt);
    // Length is fixed, compare every byte
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn digest(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}
