use crate::core::generator::normalize_domain;
use crate::utils::error::{Result, SiteMetricsError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證使用者輸入的網站，回傳正規化後的網域
pub fn validate_website_input(field_name: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SiteMetricsError::EmptyInputError {
            field: field_name.to_string(),
        });
    }

    let domain = normalize_domain(trimmed);
    if !domain.contains('.') {
        return Err(SiteMetricsError::InvalidDomainError {
            field: field_name.to_string(),
            value: trimmed.to_string(),
        });
    }

    Ok(domain)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteMetricsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteMetricsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteMetricsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SiteMetricsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SiteMetricsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SiteMetricsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_website_input() {
        assert_eq!(
            validate_website_input("website", "  https://www.example.com/about ").unwrap(),
            "example.com"
        );
        assert_eq!(validate_website_input("website", "blog.rust-lang.org").unwrap(), "blog.rust-lang.org");

        assert!(matches!(
            validate_website_input("website", "   "),
            Err(SiteMetricsError::EmptyInputError { .. })
        ));
        assert!(matches!(
            validate_website_input("website", "localhost"),
            Err(SiteMetricsError::InvalidDomainError { .. })
        ));
        // the dot only counts before the first slash
        assert!(validate_website_input("website", "http://intranet/page.html").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("share.base_url", "https://sitemetrics.app").is_ok());
        assert!(validate_url("share.base_url", "http://localhost:8080/").is_ok());
        assert!(validate_url("share.base_url", "").is_err());
        assert!(validate_url("share.base_url", "not a url").is_err());
        assert!(validate_url("share.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("loading.step_delay_ms", 800u64, 0, 10_000).is_ok());
        assert!(validate_range("loading.step_delay_ms", 20_000u64, 0, 10_000).is_err());
    }
}
