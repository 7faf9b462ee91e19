use async_trait::async_trait;

use crate::error::AppResult;

/// Key-addressed blob storage for submitted source code.
///
/// Keys are written once. Implementations never need to handle overwrites
/// from this service, but must not fail if the same bytes are put twice.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` with an HTTP `Cache-Control` hint.
    async fn put(&self, key: &str, data: Vec<u8>, cache_control: &str) -> AppResult<()>;

    /// Retrieve all bytes stored under `key`.
    ///
    /// Fails with `NotFound` if nothing was stored there.
    async fn get(&self, key: &str) -> AppResult<Vec<u8>>;
}
