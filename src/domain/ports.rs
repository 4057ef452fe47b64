use crate::domain::model::WebsiteMetrics;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Key/value blob storage. Keys are flat names such as `sitemetrics-bookmarks`.
pub trait Storage: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `path` yet.
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location of `path` as shown to the user.
    fn describe(&self, path: &str) -> String;
}

#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn fetch(&self, domain: &str, today: NaiveDate) -> Result<WebsiteMetrics>;
}
