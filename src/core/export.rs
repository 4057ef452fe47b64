use crate::core::chart::{device_chart, traffic_chart};
use crate::core::Storage;
use crate::domain::model::{Theme, WebsiteMetrics};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const METRICS_FILE: &str = "metrics.json";
pub const DAILY_FILE: &str = "daily_traffic.csv";
pub const MONTHLY_FILE: &str = "monthly_traffic.csv";
pub const SOURCES_FILE: &str = "traffic_sources.tsv";
pub const CHARTS_FILE: &str = "charts.json";

/// Archive name for a domain; anything outside `[A-Za-z0-9.-]` becomes `_`.
pub fn report_file_name(domain: &str) -> String {
    let safe: String = domain
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("{}_report.zip", safe.replace("..", "_"))
}

fn daily_csv(metrics: &WebsiteMetrics) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "visitors", "page_views"])?;
    for day in &metrics.daily_traffic {
        writer.write_record([
            day.date.to_string(),
            day.visitors.to_string(),
            day.page_views.to_string(),
        ])?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

fn monthly_csv(metrics: &WebsiteMetrics) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["month", "visitors", "page_views"])?;
    for month in &metrics.monthly_traffic {
        writer.write_record([
            month.month.clone(),
            month.visitors.to_string(),
            month.page_views.to_string(),
        ])?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

fn sources_tsv(metrics: &WebsiteMetrics) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(Vec::new());
    writer.write_record(["source", "color", "percentage", "visits"])?;
    for source in &metrics.traffic_sources {
        writer.write_record([
            source.name.clone(),
            source.color.clone(),
            source.percentage.to_string(),
            source.visits.to_string(),
        ])?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Writes the zipped report for `metrics` and returns where it was stored.
pub async fn export_report<S: Storage>(
    storage: &S,
    metrics: &WebsiteMetrics,
    theme: Theme,
) -> Result<String> {
    let file_name = report_file_name(&metrics.domain);

    let charts = serde_json::json!({
        "traffic": traffic_chart(metrics, theme),
        "devices": device_chart(metrics, theme),
    });

    let zip_data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>(METRICS_FILE, FileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(metrics)?.as_bytes())?;

        zip.start_file::<_, ()>(DAILY_FILE, FileOptions::default())?;
        zip.write_all(&daily_csv(metrics)?)?;

        zip.start_file::<_, ()>(MONTHLY_FILE, FileOptions::default())?;
        zip.write_all(&monthly_csv(metrics)?)?;

        zip.start_file::<_, ()>(SOURCES_FILE, FileOptions::default())?;
        zip.write_all(&sources_tsv(metrics)?)?;

        zip.start_file::<_, ()>(CHARTS_FILE, FileOptions::default())?;
        zip.write_all(serde_json::to_string_pretty(&charts)?.as_bytes())?;

        // 完成並取回底層 Vec<u8>
        let cursor = zip.finish()?;
        cursor.into_inner()
    };

    tracing::debug!("Writing report ({} bytes) for {}", zip_data.len(), metrics.domain);
    storage.write_file(&file_name, &zip_data).await?;

    Ok(storage.describe(&file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::generator::generate_on;
    use chrono::NaiveDate;
    use std::io::Read;

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("example.com"), "example.com_report.zip");
        assert_eq!(report_file_name("a..b/c:d"), "a_b_c_d_report.zip");
    }

    #[tokio::test]
    async fn test_export_report_contents() {
        let storage = MemoryStorage::new();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let metrics = generate_on("example.com", today);

        let location = export_report(&storage, &metrics, Theme::Light).await.unwrap();
        assert_eq!(location, "memory:example.com_report.zip");

        let data = storage.get("example.com_report.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 5);

        let mut daily = String::new();
        archive.by_name(DAILY_FILE).unwrap().read_to_string(&mut daily).unwrap();
        let lines: Vec<&str> = daily.lines().collect();
        assert_eq!(lines.len(), 31);
        assert_eq!(lines[0], "date,visitors,page_views");
        assert_eq!(lines[1], "2024-02-15,19426,176783");
        assert_eq!(lines[30], "2024-03-15,116693,41852");

        let mut sources = String::new();
        archive.by_name(SOURCES_FILE).unwrap().read_to_string(&mut sources).unwrap();
        assert!(sources.starts_with("source\tcolor\tpercentage\tvisits\norganic\t#3b82f6\t47\t43265"));

        let mut json = String::new();
        archive.by_name(METRICS_FILE).unwrap().read_to_string(&mut json).unwrap();
        let parsed: WebsiteMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metrics);
    }
}
