use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with a fresh random salt, returning the PHC string.
pub fn hash_password(hasher: &Argon2<'_>, password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| err.to_string())
}

/// Verify a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(hasher: &Argon2<'_>, password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    hasher
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
pub(crate) fn test_hasher() -> Argon2<'static> {
    use argon2::{Algorithm, Params, Version};

    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_not_plaintext() {
        let hasher = test_hasher();
        let first = hash_password(&hasher, "Demo2024!").unwrap();
        let second = hash_password(&hasher, "Demo2024!").unwrap();

        assert_ne!(first, "Demo2024!");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn verify_accepts_only_the_right_password() {
        let hasher = test_hasher();
        let hash = hash_password(&hasher, "correct horse").unwrap();

        assert!(verify_password(&hasher, "correct horse", &hash));
        assert!(!verify_password(&hasher, "correct horsE", &hash));
        assert!(!verify_password(&hasher, "", &hash));
    }

    #[test]
    fn malformed_or_tampered_hash_never_matches() {
        let hasher = test_hasher();
        let hash = hash_password(&hasher, "password123").unwrap();
        let replacement = if hash.ends_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}{}", &hash[..hash.len() - 1], replacement);

        assert!(!verify_password(&hasher, "password123", "not-a-hash"));
        assert!(!verify_password(&hasher, "password123", &tampered));
    }
}
