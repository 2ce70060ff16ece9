//! Password hashing (bcrypt).
//!
//! bcrypt salts internally, so hashing the same password twice yields two
//! different hash strings that both verify.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, BcryptError> {
    verify(password, stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_hashes_differently_but_both_verify() {
        let a = hash("abc123", 4).unwrap();
        let b = hash("abc123", 4).unwrap();
        assert_ne!(a, b);
        assert!(verify("abc123", &a).unwrap());
        assert!(verify("abc123", &b).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let h = hash("abc123", 4).unwrap();
        assert!(!verify("abc124", &h).unwrap());
        assert!(!verify("", &h).unwrap());
    }

    #[test]
    fn default_cost_roundtrip() {
        let h = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &h).unwrap());
        assert!(!verify_password("hunter3", &h).unwrap());
    }
}
