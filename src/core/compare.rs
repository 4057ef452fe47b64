use crate::core::generator::generate_on;
use crate::domain::model::WebsiteMetrics;
use crate::utils::error::Result;
use crate::utils::validation::validate_website_input;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    A,
    B,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineMetrics {
    pub domain: String,
    pub monthly_visitors: i64,
    pub page_views: i64,
    pub bounce_rate: i64,
    pub estimated_revenue: i64,
}

impl From<&WebsiteMetrics> for HeadlineMetrics {
    fn from(metrics: &WebsiteMetrics) -> Self {
        Self {
            domain: metrics.domain.clone(),
            monthly_visitors: metrics.monthly_visitors,
            page_views: metrics.page_views,
            bounce_rate: metrics.bounce_rate,
            estimated_revenue: metrics.estimated_revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricLeaders {
    pub monthly_visitors: Leader,
    pub page_views: Leader,
    pub bounce_rate: Leader,
    pub estimated_revenue: Leader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub a: HeadlineMetrics,
    pub b: HeadlineMetrics,
    pub leaders: MetricLeaders,
}

fn higher_wins(a: i64, b: i64) -> Leader {
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => Leader::A,
        std::cmp::Ordering::Less => Leader::B,
        std::cmp::Ordering::Equal => Leader::Tie,
    }
}

impl Comparison {
    pub fn between(a: &WebsiteMetrics, b: &WebsiteMetrics) -> Self {
        let leaders = MetricLeaders {
            monthly_visitors: higher_wins(a.monthly_visitors, b.monthly_visitors),
            page_views: higher_wins(a.page_views, b.page_views),
            // lower bounce rate is better
            bounce_rate: higher_wins(b.bounce_rate, a.bounce_rate),
            estimated_revenue: higher_wins(a.estimated_revenue, b.estimated_revenue),
        };

        Self {
            a: a.into(),
            b: b.into(),
            leaders,
        }
    }
}

/// Validates both inputs and compares their generated metrics.
pub fn compare(website_a: &str, website_b: &str, today: NaiveDate) -> Result<Comparison> {
    let domain_a = validate_website_input("website_a", website_a)?;
    let domain_b = validate_website_input("website_b", website_b)?;

    tracing::debug!("Comparing {} vs {}", domain_a, domain_b);
    let a = generate_on(&domain_a, today);
    let b = generate_on(&domain_b, today);

    Ok(Comparison::between(&a, &b))
}
