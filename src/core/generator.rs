//! Deterministic synthetic analytics.
//!
//! Every number is derived from a 32-bit string hash of the domain, fed through
//! `sin`-based pseudo-random scaling. The hash and the scaling must stay
//! bit-compatible with the dashboard's JavaScript so that the same domain shows the
//! same numbers in both.

use crate::domain::model::{
    CountryShare, DailyTraffic, DeviceShare, MonthlyTraffic, TrafficSource, WebsiteMetrics,
};
use chrono::{Duration, NaiveDate, Utc};

struct ChannelSpec {
    name: &'static str,
    color: &'static str,
    base_percent: i64,
}

struct CountrySpec {
    name: &'static str,
    flag: &'static str,
    code: &'static str,
}

const TRAFFIC_SOURCES: [ChannelSpec; 5] = [
    ChannelSpec { name: "organic", color: "#3b82f6", base_percent: 45 },
    ChannelSpec { name: "direct", color: "#8b5cf6", base_percent: 25 },
    ChannelSpec { name: "social", color: "#10b981", base_percent: 15 },
    ChannelSpec { name: "paid", color: "#f59e0b", base_percent: 10 },
    ChannelSpec { name: "referral", color: "#ef4444", base_percent: 5 },
];

const DEVICES: [ChannelSpec; 3] = [
    ChannelSpec { name: "Desktop", color: "#3b82f6", base_percent: 55 },
    ChannelSpec { name: "Mobile", color: "#8b5cf6", base_percent: 35 },
    ChannelSpec { name: "Tablet", color: "#10b981", base_percent: 10 },
];

const COUNTRIES: [CountrySpec; 8] = [
    CountrySpec { name: "United States", flag: "🇺🇸", code: "US" },
    CountrySpec { name: "United Kingdom", flag: "🇬🇧", code: "GB" },
    CountrySpec { name: "Germany", flag: "🇩🇪", code: "DE" },
    CountrySpec { name: "France", flag: "🇫🇷", code: "FR" },
    CountrySpec { name: "Canada", flag: "🇨🇦", code: "CA" },
    CountrySpec { name: "Australia", flag: "🇦🇺", code: "AU" },
    CountrySpec { name: "Japan", flag: "🇯🇵", code: "JP" },
    CountrySpec { name: "Netherlands", flag: "🇳🇱", code: "NL" },
];

const DISPLAYED_COUNTRIES: usize = 5;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAILY_WINDOW: i64 = 30;

/// Strips `http://`/`https://` and a leading `www.`, then cuts at the first `/`.
pub fn normalize_domain(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    match rest.find('/') {
        Some(end) => rest[..end].to_string(),
        None => rest.to_string(),
    }
}

/// `hash * 31 + unit` over UTF-16 code units with 32-bit wraparound, absolute-valued.
pub fn hash_code(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Integer in `[min, max]` from the fractional part of `sin(seed) * 10000`.
pub fn pseudo_random(seed: i64, min: i64, max: i64) -> i64 {
    let x = (seed as f64).sin() * 10000.0;
    let fraction = x - x.floor();
    (fraction * (max - min + 1) as f64).floor() as i64 + min
}

/// Metrics for `url` with daily traffic ending on the current UTC date.
pub fn generate(url: &str) -> WebsiteMetrics {
    generate_on(url, Utc::now().date_naive())
}

pub fn generate_on(url: &str, today: NaiveDate) -> WebsiteMetrics {
    let domain = normalize_domain(url);
    let seed = i64::from(hash_code(&domain));

    WebsiteMetrics {
        monthly_visitors: pseudo_random(seed, 50_000, 50_000_000),
        page_views: pseudo_random(seed + 1, 100_000, 200_000_000),
        bounce_rate: pseudo_random(seed + 2, 25, 85),
        avg_session_duration: pseudo_random(seed + 3, 120, 600),
        estimated_revenue: pseudo_random(seed + 4, 1_000, 5_000_000),
        traffic_sources: traffic_sources(seed),
        device_data: device_data(seed),
        top_countries: top_countries(seed),
        monthly_traffic: monthly_traffic(seed),
        daily_traffic: daily_traffic(seed, today),
        domain,
    }
}

fn traffic_sources(seed: i64) -> Vec<TrafficSource> {
    TRAFFIC_SOURCES
        .iter()
        .zip(0i64..)
        .map(|(source, index)| {
            let variance = pseudo_random(seed + index, -10, 10);
            TrafficSource {
                name: source.name.to_string(),
                color: source.color.to_string(),
                base_percent: source.base_percent,
                percentage: (source.base_percent + variance).max(1),
                visits: pseudo_random(seed + index + 10, 1_000, 100_000),
            }
        })
        .collect()
}

fn device_data(seed: i64) -> Vec<DeviceShare> {
    DEVICES
        .iter()
        .zip(0i64..)
        .map(|(device, index)| {
            let variance = pseudo_random(seed + index, -15, 15);
            DeviceShare {
                name: device.name.to_string(),
                color: device.color.to_string(),
                base_percent: device.base_percent,
                percentage: (device.base_percent + variance).max(5),
            }
        })
        .collect()
}

fn top_countries(seed: i64) -> Vec<CountryShare> {
    COUNTRIES
        .iter()
        .take(DISPLAYED_COUNTRIES)
        .zip(0i64..)
        .map(|(country, index)| CountryShare {
            name: country.name.to_string(),
            flag: country.flag.to_string(),
            code: country.code.to_string(),
            percentage: pseudo_random(seed + index, 5, 35),
            visits: pseudo_random(seed + index + 20, 5_000, 500_000),
        })
        .collect()
}

fn monthly_traffic(seed: i64) -> Vec<MonthlyTraffic> {
    MONTHS
        .iter()
        .zip(0i64..)
        .map(|(month, index)| MonthlyTraffic {
            month: month.to_string(),
            visitors: pseudo_random(seed + index, 100_000, 5_000_000),
            page_views: pseudo_random(seed + index + 12, 200_000, 10_000_000),
        })
        .collect()
}

fn daily_traffic(seed: i64, today: NaiveDate) -> Vec<DailyTraffic> {
    (0..DAILY_WINDOW)
        .rev()
        .map(|days_ago| DailyTraffic {
            date: today - Duration::days(days_ago),
            visitors: pseudo_random(seed + days_ago, 5_000, 200_000),
            page_views: pseudo_random(seed + days_ago + 30, 10_000, 400_000),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://www.example.com/path/page"), "example.com");
        assert_eq!(normalize_domain("http://news.ycombinator.com"), "news.ycombinator.com");
        assert_eq!(normalize_domain("www.github.com"), "github.com");
        assert_eq!(normalize_domain("example.org/"), "example.org");
        // only one scheme and one www. are removed, both case-sensitive
        assert_eq!(normalize_domain("HTTPS://Example.com"), "HTTPS:");
        assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn test_hash_code_reference_values() {
        assert_eq!(hash_code("example.com"), 1_944_013_059);
        assert_eq!(hash_code("google.com"), 1_536_293_812);
        assert_eq!(hash_code("github.com"), 1_985_010_934);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("aaaaaaaaaaaaaaaaaaaa"), 1_542_361_408);
    }

    #[test]
    fn test_hash_code_uses_utf16_units() {
        assert_eq!(hash_code("日本.jp"), 892_870_995);
    }

    #[test]
    fn test_pseudo_random_reference_values() {
        assert_eq!(pseudo_random(0, 1, 10), 1);
        assert_eq!(pseudo_random(0, -10, 10), -10);
        assert_eq!(pseudo_random(1, 0, 100), 71);
        assert_eq!(pseudo_random(1_944_013_059, 50_000, 50_000_000), 28_660_615);
    }

    #[test]
    fn test_pseudo_random_degenerate_range() {
        for seed in 0..100 {
            assert_eq!(pseudo_random(seed, 7, 7), 7);
        }
    }

    #[test]
    fn test_generate_example_com() {
        let metrics = generate_on("https://www.example.com/pricing", day(2024, 3, 15));

        assert_eq!(metrics.domain, "example.com");
        assert_eq!(metrics.monthly_visitors, 28_660_615);
        assert_eq!(metrics.page_views, 103_172_837);
        assert_eq!(metrics.bounce_rate, 32);
        assert_eq!(metrics.avg_session_duration, 483);
        assert_eq!(metrics.estimated_revenue, 2_930_232);

        let sources: Vec<(i64, i64)> = metrics
            .traffic_sources
            .iter()
            .map(|s| (s.percentage, s.visits))
            .collect();
        assert_eq!(sources, vec![(47, 43265), (25, 9222), (7, 81072), (15, 17139), (7, 3640)]);

        let devices: Vec<i64> = metrics.device_data.iter().map(|d| d.percentage).collect();
        assert_eq!(devices, vec![57, 35, 5]);

        let countries: Vec<(&str, i64, i64)> = metrics
            .top_countries
            .iter()
            .map(|c| (c.code.as_str(), c.percentage, c.visits))
            .collect();
        assert_eq!(
            countries,
            vec![
                ("US", 22, 200671),
                ("GB", 20, 417570),
                ("DE", 8, 88333),
                ("FR", 28, 139208),
                ("CA", 23, 195269),
            ]
        );

        assert_eq!(metrics.monthly_traffic[0].visitors, 2_906_647);
        assert_eq!(metrics.monthly_traffic[0].page_views, 8_126_240);
        assert_eq!(metrics.monthly_traffic[11].visitors, 506_946);
        assert_eq!(metrics.monthly_traffic[11].page_views, 2_857_050);

        let first = &metrics.daily_traffic[0];
        assert_eq!(first.date, day(2024, 2, 15));
        assert_eq!((first.visitors, first.page_views), (19426, 176783));
        let last = &metrics.daily_traffic[29];
        assert_eq!(last.date, day(2024, 3, 15));
        assert_eq!((last.visitors, last.page_views), (116693, 41852));
    }

    #[test]
    fn test_static_tables_order() {
        let metrics = generate_on("example.com", day(2024, 1, 1));
        let names: Vec<&str> = metrics.traffic_sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["organic", "direct", "social", "paid", "referral"]);
        let devices: Vec<&str> = metrics.device_data.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(devices, vec!["Desktop", "Mobile", "Tablet"]);
        let months: Vec<&str> = metrics.monthly_traffic.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, MONTHS.to_vec());
        assert_eq!(metrics.top_countries[4].flag, "🇨🇦");
    }

    #[test]
    fn test_daily_traffic_crosses_year_boundary() {
        let metrics = generate_on("example.com", day(2025, 1, 10));
        assert_eq!(metrics.daily_traffic[0].date, day(2024, 12, 12));
        assert!(metrics
            .daily_traffic
            .windows(2)
            .all(|w| w[1].date - w[0].date == Duration::days(1)));
    }
}
