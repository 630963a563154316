use super::error::AdminError;

/// Hash a plaintext credential with a fresh random salt.
///
/// bcrypt is deliberately slow, so the work runs on the blocking pool.
pub async fn hash_password(plaintext: &str, cost: u32) -> Result<String, AdminError> {
    let plaintext = plaintext.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
    Ok(hashed)
}

/// Check a plaintext credential against a stored bcrypt hash.
///
/// The salt and cost are read from the hash itself, so hashes written by
/// other bcrypt implementations (`$2a$`, `$2y$`) verify as well.
pub async fn verify_password(plaintext: &str, hash: &str) -> Result<bool, AdminError> {
    let plaintext = plaintext.to_owned();
    let hash = hash.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("Password123!", 4).await.unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert_ne!(hash, "Password123!");

        assert!(verify_password("Password123!", &hash).await.unwrap());
        assert!(!verify_password("WrongPassword123!", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let first = hash_password("same", 4).await.unwrap();
        let second = hash_password("same", 4).await.unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same", &first).await.unwrap());
        assert!(verify_password("same", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_default_cost_is_embedded() {
        let hash = hash_password("secret", crate::DEFAULT_HASH_COST).await.unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("secret", "not-a-bcrypt-hash").await,
            Err(AdminError::Hashing(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_cost_is_an_error() {
        assert!(hash_password("secret", 2).await.is_err());
    }
}
