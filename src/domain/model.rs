use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSource {
    pub name: String,
    pub color: String,
    pub base_percent: i64,
    pub percentage: i64,
    pub visits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceShare {
    pub name: String,
    pub color: String,
    pub base_percent: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryShare {
    pub name: String,
    pub flag: String,
    pub code: String,
    pub percentage: i64,
    pub visits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTraffic {
    pub month: String,
    pub visitors: i64,
    pub page_views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTraffic {
    pub date: NaiveDate,
    pub visitors: i64,
    pub page_views: i64,
}

/// Synthetic analytics for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteMetrics {
    pub domain: String,
    pub monthly_visitors: i64,
    pub page_views: i64,
    pub bounce_rate: i64,
    /// Seconds.
    pub avg_session_duration: i64,
    pub estimated_revenue: i64,
    pub traffic_sources: Vec<TrafficSource>,
    pub device_data: Vec<DeviceShare>,
    pub top_countries: Vec<CountryShare>,
    pub monthly_traffic: Vec<MonthlyTraffic>,
    /// Oldest first, the last entry is the reference day.
    pub daily_traffic: Vec<DailyTraffic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub domain: String,
    pub monthly_visitors: i64,
    pub estimated_revenue: i64,
    pub saved_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn from_metrics(metrics: &WebsiteMetrics, saved_at: DateTime<Utc>) -> Self {
        Self {
            domain: metrics.domain.clone(),
            monthly_visitors: metrics.monthly_visitors,
            estimated_revenue: metrics.estimated_revenue,
            saved_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Analytics,
    Compare,
    Bookmarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// A short notification for the person using the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ToastKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}
