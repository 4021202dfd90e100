//! Argon2id password hashing on a bounded blocking pool.
//!
//! Hashing is CPU-bound, so every call runs through [`tokio::task::spawn_blocking`]
//! and holds a permit from a shared semaphore. At most `max_concurrency` hashes
//! are computed at once regardless of how many requests are waiting.

use std::sync::Arc;

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::rngs::OsRng;
use tokio::sync::Semaphore;

use crate::utility::tracing_targets::TRACING_TARGET_PASSWORD_HASHER as TRACING_TARGET;
use crate::{Error, Result};

/// Default number of hashes computed concurrently.
pub const DEFAULT_HASHER_MAX_CONCURRENCY: usize = 4;

/// Secure password hashing and verification service using Argon2id.
///
/// Cloning is cheap and clones share the same concurrency limit.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    permits: Arc<Semaphore>,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Creates a new [`PasswordHasher`] with the default concurrency limit.
    pub fn new() -> Result<Self> {
        Self::with_max_concurrency(DEFAULT_HASHER_MAX_CONCURRENCY)
    }

    /// Creates a new [`PasswordHasher`] computing at most `max_concurrency`
    /// hashes at once. A limit of zero is raised to one.
    ///
    /// Computes the hash used for unknown-account verification up front, so
    /// this fails when the entropy source is unavailable.
    pub fn with_max_concurrency(max_concurrency: usize) -> Result<Self> {
        let argon2 = Argon2::default();
        let dummy_hash = hash_with(&argon2, &random_password())?;

        Ok(Self {
            argon2,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Returns the number of hashing slots currently free.
    #[inline]
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Hashes a password using Argon2id with a fresh random salt.
    ///
    /// The returned PHC string embeds the algorithm, its parameters and the
    /// salt, so verification needs nothing else. Any password is accepted;
    /// this fails only when the entropy source or the worker pool fails.
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        self.offload(move |argon2| hash_with(argon2, &password))
            .await?
    }

    /// Verifies a password against a stored hash in constant time.
    ///
    /// Returns `Ok(false)` both for a wrong password and for a stored hash
    /// that cannot be parsed. The two cases are logged at different levels.
    pub async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        self.offload(move |argon2| verify_with(argon2, &password, &stored_hash))
            .await
    }

    /// Verifies against the precomputed hash of a random password and always
    /// returns `false`.
    ///
    /// Used when the account does not exist, so that a login for an unknown
    /// username performs exactly one verification, like a wrong password does.
    pub async fn verify_dummy_password(&self, password: &str) -> Result<bool> {
        let password = password.to_owned();
        let dummy_hash = self.dummy_hash.clone();
        self.offload(move |argon2| {
            let _ = verify_with(argon2, &password, &dummy_hash);
            false
        })
        .await
    }

    async fn offload<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Argon2<'static>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.permits.clone().acquire_owned().await.map_err(|e| {
            Error::internal("password_hasher", "worker pool is closed").with_source(e)
        })?;

        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            work(&argon2)
        })
        .await
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "hashing task did not complete"
            );

            Error::internal("password_hasher", "hashing task failed").with_source(e)
        })
    }
}

fn hash_with(argon2: &Argon2<'static>, password: &str) -> Result<String> {
    let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %e,
            "failed to generate cryptographically secure salt"
        );

        Error::internal("password_hasher", "salt generation failed")
    })?;

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "password hashing operation failed"
            );

            Error::internal("password_hasher", "hash generation failed")
        })?;

    Ok(password_hash.to_string())
}

fn verify_with(argon2: &Argon2<'static>, password: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(parsed_hash) => parsed_hash,
        Err(e) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is malformed"
            );

            return false;
        }
    };

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => true,
        Err(ArgonError::Password) => {
            tracing::debug!(
                target: TRACING_TARGET,
                "password verification failed: incorrect password provided"
            );

            false
        }
        Err(e) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "password verification system error"
            );

            false
        }
    }
}

fn random_password() -> String {
    use rand::Rng;

    let password_len = rand::random_range(16..32);
    (0..password_len)
        .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        let hash = hasher.hash_password("secure_password_123").await?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("secure_password_123", &hash).await?);
        assert!(!hasher.verify_password("wrong_password", &hash).await?);

        Ok(())
    }

    #[tokio::test]
    async fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;

        let hash1 = hasher.hash_password("test_password").await?;
        let hash2 = hasher.hash_password("test_password").await?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password("test_password", &hash1).await?);
        assert!(hasher.verify_password("test_password", &hash2).await?);

        Ok(())
    }

    #[tokio::test]
    async fn empty_and_unicode_passwords_hash() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;

        let empty = hasher.hash_password("").await?;
        assert!(hasher.verify_password("", &empty).await?);
        assert!(!hasher.verify_password(" ", &empty).await?);

        let unicode = hasher.hash_password("pässwörd-密码").await?;
        assert!(hasher.verify_password("pässwörd-密码", &unicode).await?);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_hash_does_not_verify() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        assert!(!hasher.verify_password("test_password", "invalid_hash_format").await?);
        assert!(!hasher.verify_password("test_password", "").await?);

        Ok(())
    }

    #[tokio::test]
    async fn dummy_verification_never_succeeds() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new()?;
        assert!(!hasher.verify_dummy_password("any_password").await?);

        Ok(())
    }

    #[tokio::test]
    async fn dummy_verification_costs_one_verification() -> anyhow::Result<()> {
        use std::time::{Duration, Instant};

        const ROUNDS: u32 = 5;

        let hasher = PasswordHasher::new()?;
        let stored = hasher.hash_password("correct_password").await?;

        // Warm up the blocking pool before timing either path.
        hasher.verify_password("warm_up", &stored).await?;
        hasher.verify_dummy_password("warm_up").await?;

        let mut wrong_password = Duration::ZERO;
        let mut unknown_account = Duration::ZERO;
        for _ in 0..ROUNDS {
            let started = Instant::now();
            assert!(!hasher.verify_password("wrong_password", &stored).await?);
            wrong_password += started.elapsed();

            let started = Instant::now();
            assert!(!hasher.verify_dummy_password("wrong_password").await?);
            unknown_account += started.elapsed();
        }

        let ratio = unknown_account.as_secs_f64() / wrong_password.as_secs_f64();
        assert!(ratio < 1.5, "unknown account took {ratio:.2}x a wrong password");

        Ok(())
    }

    #[tokio::test]
    async fn concurrency_limit_is_released() -> anyhow::Result<()> {
        let hasher = PasswordHasher::with_max_concurrency(2)?;
        assert_eq!(hasher.available_permits(), 2);

        let (a, b, c) = tokio::join!(
            hasher.hash_password("password_a"),
            hasher.hash_password("password_b"),
            hasher.hash_password("password_c"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(hasher.available_permits(), 2);

        Ok(())
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() -> anyhow::Result<()> {
        let hasher = PasswordHasher::with_max_concurrency(0)?;
        assert_eq!(hasher.available_permits(), 1);

        Ok(())
    }
}
