use crate::core::generator::generate_on;
use crate::domain::model::WebsiteMetrics;
use crate::domain::ports::MetricsSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

pub const LOADING_STEPS: [&str; 4] = [
    "Fetching analytics data...",
    "Processing traffic metrics...",
    "Analyzing visitor patterns...",
    "Generating insights...",
];

/// Metrics produced locally by the deterministic generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratedSource {
    step_delay: Duration,
}

impl GeneratedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause between loading steps, for a presentation that mimics a real fetch.
    pub fn with_step_delay(step_delay: Duration) -> Self {
        Self { step_delay }
    }
}

#[async_trait]
impl MetricsSource for GeneratedSource {
    async fn fetch(&self, domain: &str, today: NaiveDate) -> Result<WebsiteMetrics> {
        for step in LOADING_STEPS {
            tracing::info!("⏳ {}", step);
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }

        let metrics = generate_on(domain, today);
        tracing::debug!(
            "Generated metrics for {} ({} daily points)",
            metrics.domain,
            metrics.daily_traffic.len()
        );
        Ok(metrics)
    }
}
