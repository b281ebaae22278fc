//! bcrypt-backed password hasher.
//!
//! bcrypt runs on tokio's blocking pool so that hashing never stalls the
//! workers driving WebSocket connections.

use async_trait::async_trait;

use crate::domain::{Password, PasswordError, PasswordHasher};

/// Work factor used by the server unless configured otherwise.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` is clamped to the range bcrypt accepts (4..=31).
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

async fn run_blocking<T, F>(job: F) -> Result<T, PasswordError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| PasswordError(e.to_string()))?
        .map_err(|e| PasswordError(e.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<String, PasswordError> {
        let password = password.as_str().to_owned();
        let cost = self.cost;
        run_blocking(move || bcrypt::hash(password, cost)).await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        run_blocking(move || bcrypt::verify(password, &hash)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        // テスト項目: ハッシュ化したパスワードを検証できる
        // given (前提条件):
        let hasher = BcryptPasswordHasher::new(4);
        let password = Password::new("correct horse".to_string()).unwrap();

        // when (操作):
        let hash = hasher.hash(&password).await.unwrap();

        // then (期待する結果):
        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash_is_error() {
        // テスト項目: 不正なハッシュ文字列に対する検証はエラーになる
        // given (前提条件):
        let hasher = BcryptPasswordHasher::new(4);

        // when (操作):
        let result = hasher.verify("secret", "not-a-hash").await;

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_the_runtime_thread_free() {
        // テスト項目: ハッシュ計算中もランタイムのスレッドは他のタスクを処理できる
        // given (前提条件):
        let hasher = BcryptPasswordHasher::new(DEFAULT_BCRYPT_COST);
        let hashing = tokio::spawn(async move {
            let password = Password::new("correct horse".to_string()).unwrap();
            hasher.hash(&password).await
        });

        // when (操作):
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        // then (期待する結果):
        // 計算は別スレッドで進行中のため、タイマーが先に完了している
        assert!(!hashing.is_finished());
        assert!(hashing.await.unwrap().is_ok());
    }
}
