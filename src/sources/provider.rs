use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait that every upstream game source must implement.
///
/// A source returns raw, un-normalized game records. Any error returned here
/// is fatal for the run.
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Fetch every raw game record the source currently offers.
    async fn fetch_games(&self) -> Result<Vec<Value>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
