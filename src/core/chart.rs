use crate::domain::model::{Theme, WebsiteMetrics};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTheme {
    pub text_color: &'static str,
    pub grid_color: &'static str,
}

impl ChartTheme {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text_color: "#1f2937",
                grid_color: "#e5e7eb",
            },
            Theme::Dark => Self {
                text_color: "#f9fafb",
                grid_color: "#374151",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<i64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
    pub theme: ChartTheme,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoughnutChart {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
    pub background_colors: Vec<String>,
    pub cutout: String,
    pub theme: ChartTheme,
}

/// Visitors and page views over the 30-day window.
pub fn traffic_chart(metrics: &WebsiteMetrics, theme: Theme) -> LineChart {
    let labels = metrics
        .daily_traffic
        .iter()
        .map(|day| day.date.format("%b %-d").to_string())
        .collect();

    let datasets = vec![
        LineDataset {
            label: "Visitors".to_string(),
            data: metrics.daily_traffic.iter().map(|d| d.visitors).collect(),
            border_color: "#3b82f6".to_string(),
            background_color: "rgba(59, 130, 246, 0.1)".to_string(),
            fill: true,
            tension: 0.4,
        },
        LineDataset {
            label: "Page Views".to_string(),
            data: metrics.daily_traffic.iter().map(|d| d.page_views).collect(),
            border_color: "#8b5cf6".to_string(),
            background_color: "rgba(139, 92, 246, 0.1)".to_string(),
            fill: true,
            tension: 0.4,
        },
    ];

    LineChart {
        labels,
        datasets,
        theme: ChartTheme::for_theme(theme),
    }
}

pub fn device_chart(metrics: &WebsiteMetrics, theme: Theme) -> DoughnutChart {
    DoughnutChart {
        labels: metrics.device_data.iter().map(|d| d.name.clone()).collect(),
        data: metrics.device_data.iter().map(|d| d.percentage).collect(),
        background_colors: metrics.device_data.iter().map(|d| d.color.clone()).collect(),
        cutout: "60%".to_string(),
        theme: ChartTheme::for_theme(theme),
    }
}
