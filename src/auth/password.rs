use sha2::{Digest, Sha256};

/// Passwords are stored as unsalted SHA-256 hex digests. The format is kept
/// compatible with the credential rows already in the database; see
/// DESIGN.md for the migration note.
pub fn hash_password(plain: &str) -> String {
    format!("{:x}", Sha256::digest(plain.as_bytes()))
}

pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    hash_password(plain) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password);
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let hash = hash_password("hello");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // Known vector for sha256("hello")
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
