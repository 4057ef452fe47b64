use crate::core::Storage;
use crate::domain::model::{Bookmark, Theme};
use crate::utils::error::{Result, SiteMetricsError};

pub const BOOKMARKS_KEY: &str = "sitemetrics-bookmarks";
pub const THEME_KEY: &str = "sitemetrics-theme";

/// Bookmarks and theme kept in key/value storage.
pub struct BookmarkStore<S: Storage> {
    storage: S,
}

impl<S: Storage> BookmarkStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn load_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let Some(data) = self.storage.read_file(BOOKMARKS_KEY).await? else {
            tracing::debug!("No bookmarks stored yet");
            return Ok(Vec::new());
        };

        let bookmarks: Vec<Bookmark> = serde_json::from_slice(&data)?;
        tracing::debug!("Loaded {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    pub async fn save_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let json = serde_json::to_vec_pretty(bookmarks)?;
        self.storage.write_file(BOOKMARKS_KEY, &json).await?;
        tracing::debug!("Saved {} bookmarks to {}", bookmarks.len(), self.storage.describe(BOOKMARKS_KEY));
        Ok(())
    }

    /// Falls back to the light theme when nothing (or something unknown) is stored.
    pub async fn load_theme(&self) -> Result<Theme> {
        let Some(data) = self.storage.read_file(THEME_KEY).await? else {
            return Ok(Theme::default());
        };

        let raw = String::from_utf8(data).map_err(|e| SiteMetricsError::StorageError {
            key: THEME_KEY.to_string(),
            message: e.to_string(),
        })?;

        Ok(raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored theme: {}", e);
            Theme::default()
        }))
    }

    pub async fn save_theme(&self, theme: Theme) -> Result<()> {
        self.storage.write_file(THEME_KEY, theme.as_str().as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn bookmark(domain: &str) -> Bookmark {
        Bookmark {
            domain: domain.to_string(),
            monthly_visitors: 1_000,
            estimated_revenue: 2_000,
            saved_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_missing_keys_use_defaults() {
        let store = BookmarkStore::new(MemoryStorage::new());
        assert!(store.load_bookmarks().await.unwrap().is_empty());
        assert_eq!(store.load_theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_bookmarks_keep_order() {
        let store = BookmarkStore::new(MemoryStorage::new());
        let saved = vec![bookmark("b.com"), bookmark("a.com")];
        store.save_bookmarks(&saved).await.unwrap();

        assert_eq!(store.load_bookmarks().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_bookmark_json_shape() {
        let storage = MemoryStorage::new();
        let store = BookmarkStore::new(storage.clone());
        store.save_bookmarks(&[bookmark("example.com")]).await.unwrap();

        let raw = storage.get(BOOKMARKS_KEY).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value[0]["domain"], "example.com");
        assert_eq!(value[0]["monthlyVisitors"], 1_000);
        assert_eq!(value[0]["estimatedRevenue"], 2_000);
        assert_eq!(value[0]["savedAt"], "2024-01-02T03:04:05Z");
    }

    #[tokio::test]
    async fn test_theme_is_stored_as_plain_string() {
        let storage = MemoryStorage::new();
        let store = BookmarkStore::new(storage.clone());
        store.save_theme(Theme::Dark).await.unwrap();

        assert_eq!(storage.get(THEME_KEY).await.unwrap(), b"dark".to_vec());
        assert_eq!(store.load_theme().await.unwrap(), Theme::Dark);

        storage.insert(THEME_KEY, b"sepia".to_vec()).await;
        assert_eq!(store.load_theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn test_corrupted_bookmarks_are_reported() {
        let storage = MemoryStorage::new();
        storage.insert(BOOKMARKS_KEY, b"{not json".to_vec()).await;
        let store = BookmarkStore::new(storage);

        assert!(matches!(
            store.load_bookmarks().await,
            Err(SiteMetricsError::SerializationError(_))
        ));
    }
}
