use crate::core::bookmarks::BookmarkStore;
use crate::core::compare::Comparison;
use crate::core::dashboard::{reduce, Action, DashboardState, Effect};
use crate::core::share::{share_link, share_text, ShareText};
use crate::core::Storage;
use crate::domain::model::{Bookmark, Toast, WebsiteMetrics};
use crate::domain::ports::MetricsSource;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// A view the front end should draw after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Analytics(WebsiteMetrics),
    Bookmarks(Vec<Bookmark>),
    Comparison(Comparison),
}

#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub toasts: Vec<Toast>,
    pub views: Vec<View>,
    pub shared_link: Option<String>,
    pub shared_text: Option<ShareText>,
}

/// Owns the dashboard state and carries out the reducer's effects.
pub struct DashboardEngine<S: Storage, M: MetricsSource> {
    store: BookmarkStore<S>,
    source: M,
    state: DashboardState,
    share_base_url: String,
}

impl<S: Storage, M: MetricsSource> DashboardEngine<S, M> {
    /// Restores theme and bookmarks from storage.
    pub async fn open(storage: S, source: M, share_base_url: impl Into<String>) -> Result<Self> {
        let store = BookmarkStore::new(storage);
        let theme = store.load_theme().await?;
        let bookmarks = store.load_bookmarks().await?;
        tracing::debug!("Dashboard opened with theme {} and {} bookmarks", theme, bookmarks.len());

        Ok(Self {
            store,
            source,
            state: DashboardState::new(theme, bookmarks),
            share_base_url: share_base_url.into(),
        })
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Applies `action` and runs its effects in order.
    ///
    /// If saving to storage fails the state is rolled back to what it was
    /// before the action, so memory and storage keep agreeing.
    pub async fn dispatch(&mut self, action: Action, today: NaiveDate) -> Result<DispatchOutcome> {
        tracing::debug!("Dispatching {:?}", action);
        let previous = self.state.clone();
        let transition = reduce(&mut self.state, action, today);
        let mut outcome = DispatchOutcome::default();

        for effect in transition.effects {
            match effect {
                Effect::Toast(toast) => outcome.toasts.push(toast),
                Effect::PersistBookmarks => {
                    let saved = self.store.save_bookmarks(&self.state.bookmarks).await;
                    self.rollback_on_error(saved, &previous)?;
                }
                Effect::PersistTheme => {
                    let saved = self.store.save_theme(self.state.theme).await;
                    self.rollback_on_error(saved, &previous)?;
                }
                Effect::RenderAnalytics(domain) => {
                    let metrics = self.source.fetch(&domain, today).await?;
                    outcome.views.push(View::Analytics(metrics));
                }
                Effect::RenderBookmarks => {
                    outcome.views.push(View::Bookmarks(self.state.bookmarks.clone()))
                }
                Effect::RenderComparison => {
                    if let Some(comparison) = &self.state.comparison {
                        outcome.views.push(View::Comparison(comparison.clone()));
                    }
                }
                Effect::Share { website } => {
                    match share_link(&self.share_base_url, website.as_deref()) {
                        Ok(link) => {
                            outcome.toasts.push(Toast::success("Copied", "Link copied to clipboard"));
                            outcome.shared_link = Some(link);
                            outcome.shared_text = website.as_deref().map(share_text);
                        }
                        Err(e) => {
                            tracing::warn!("Could not build share link: {}", e);
                            outcome.toasts.push(Toast::error("Error", "Unable to copy link"));
                        }
                    }
                }
            }
        }

        Ok(outcome)
    }

    fn rollback_on_error(&mut self, saved: Result<()>, previous: &DashboardState) -> Result<()> {
        if let Err(e) = &saved {
            tracing::warn!("Storage write failed, restoring previous state: {}", e);
            self.state = previous.clone();
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::bookmarks::{BOOKMARKS_KEY, THEME_KEY};
    use crate::core::source::GeneratedSource;
    use crate::domain::model::{Section, Theme};
    use crate::utils::error::SiteMetricsError;
    use chrono::{TimeZone, Utc};

    /// Reads succeed, every write fails.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        async fn read_file(&self, _path: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn write_file(&self, path: &str, _data: &[u8]) -> Result<()> {
            Err(SiteMetricsError::StorageError {
                key: path.to_string(),
                message: "read-only".to_string(),
            })
        }

        fn describe(&self, path: &str) -> String {
            format!("readonly:{}", path)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    async fn engine(storage: MemoryStorage) -> DashboardEngine<MemoryStorage, GeneratedSource> {
        DashboardEngine::open(storage, GeneratedSource::new(), "https://sitemetrics.app")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_bookmark_is_persisted_after_mutation() {
        let storage = MemoryStorage::new();
        let mut dashboard = engine(storage.clone()).await;

        let outcome = dashboard.dispatch(Action::Search("example.com".into()), today()).await.unwrap();
        assert!(matches!(&outcome.views[0], View::Analytics(m) if m.domain == "example.com"));
        assert!(storage.get(BOOKMARKS_KEY).await.is_none());

        let saved_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        dashboard.dispatch(Action::BookmarkCurrent { saved_at }, today()).await.unwrap();
        assert!(storage.get(BOOKMARKS_KEY).await.is_some());

        let reopened = engine(storage).await;
        assert_eq!(reopened.state().bookmarks.len(), 1);
        assert_eq!(reopened.state().bookmarks[0].domain, "example.com");
        assert_eq!(reopened.state().section, Section::Home);
    }

    #[tokio::test]
    async fn test_theme_survives_restart() {
        let storage = MemoryStorage::new();
        let mut dashboard = engine(storage.clone()).await;
        dashboard.dispatch(Action::ToggleTheme, today()).await.unwrap();

        assert_eq!(storage.get(THEME_KEY).await.unwrap(), b"dark".to_vec());
        assert_eq!(engine(storage).await.state().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_share_builds_deep_link() {
        let mut dashboard = engine(MemoryStorage::new()).await;
        dashboard.dispatch(Action::Search("github.com".into()), today()).await.unwrap();

        let outcome = dashboard.dispatch(Action::Share, today()).await.unwrap();
        assert_eq!(
            outcome.shared_link.as_deref(),
            Some("https://sitemetrics.app/?website=github.com")
        );
        assert_eq!(outcome.toasts[0].title, "Copied");
        let text = outcome.shared_text.expect("share text");
        assert_eq!(text.title, "SiteMetrics - github.com Analytics");
    }

    #[tokio::test]
    async fn test_share_without_website_has_no_text() {
        let mut dashboard = engine(MemoryStorage::new()).await;
        let outcome = dashboard.dispatch(Action::Share, today()).await.unwrap();
        assert_eq!(outcome.shared_link.as_deref(), Some("https://sitemetrics.app/"));
        assert!(outcome.shared_text.is_none());
    }

    #[tokio::test]
    async fn test_failed_write_restores_state() {
        let mut dashboard =
            DashboardEngine::open(ReadOnlyStorage, GeneratedSource::new(), "https://sitemetrics.app")
                .await
                .unwrap();
        dashboard.dispatch(Action::Search("example.com".into()), today()).await.unwrap();

        let saved_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let err = dashboard
            .dispatch(Action::BookmarkCurrent { saved_at }, today())
            .await
            .unwrap_err();
        assert!(matches!(err, SiteMetricsError::StorageError { .. }));
        assert!(dashboard.state().bookmarks.is_empty());
        assert_eq!(dashboard.state().current_website.as_deref(), Some("example.com"));

        assert!(dashboard.dispatch(Action::ToggleTheme, today()).await.is_err());
        assert_eq!(dashboard.state().theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_share_with_bad_base_url_reports_toast() {
        let mut dashboard =
            DashboardEngine::open(MemoryStorage::new(), GeneratedSource::new(), "mailto:x")
                .await
                .unwrap();
        let outcome = dashboard.dispatch(Action::Share, today()).await.unwrap();
        assert!(outcome.shared_link.is_none());
        assert!(outcome.toasts[0].is_error());
    }
}
