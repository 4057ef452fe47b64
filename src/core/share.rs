use crate::utils::error::{Result, SiteMetricsError};
use crate::utils::validation::validate_url;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareText {
    pub title: String,
    pub text: String,
}

/// Deep link that opens the analytics view for `website` (`?website=<domain>`).
pub fn share_link(base_url: &str, website: Option<&str>) -> Result<String> {
    validate_url("share.base_url", base_url)?;
    let mut url = Url::parse(base_url).map_err(|e| SiteMetricsError::InvalidConfigValueError {
        field: "share.base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if let Some(website) = website {
        url.query_pairs_mut().clear().append_pair("website", website);
    }

    Ok(url.to_string())
}

pub fn share_text(website: &str) -> ShareText {
    ShareText {
        title: format!("SiteMetrics - {} Analytics", website),
        text: format!("Check out the analytics for {}", website),
    }
}

/// Reads the `website` query parameter from a shared link.
pub fn website_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "website")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
