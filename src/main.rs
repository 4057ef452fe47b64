use chrono::Utc;
use clap::Parser;
use site_metrics::config::cli::{BookmarkCommand, Command, ThemeCommand};
use site_metrics::config::toml_config::TomlConfig;
use site_metrics::config::{Overrides, Settings};
use site_metrics::core::dashboard::Action;
use site_metrics::core::engine::{DispatchOutcome, View};
use site_metrics::core::export::export_report;
use site_metrics::core::render::{render_analytics, render_bookmarks, render_comparison, render_toast};
use site_metrics::core::source::GeneratedSource;
use site_metrics::domain::model::Section;
use site_metrics::utils::error::ErrorSeverity;
use site_metrics::utils::logger;
use site_metrics::utils::validation::validate_website_input;
use site_metrics::{generate_on, CliConfig, DashboardEngine, LocalStorage, Result, SiteMetricsError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (可選)
    let file = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    let export_dir = match &cli.command {
        Command::Export { output, .. } => output.clone(),
        _ => None,
    };
    let overrides = Overrides {
        data_dir: cli.data_dir.clone(),
        export_dir,
        log_format: cli.log_format,
        date: cli.date.clone(),
    };

    // 驗證配置
    let settings = match Settings::resolve(file, overrides) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, settings.log_format, settings.log_level.as_deref());
    tracing::info!("🚀 Starting site-metrics");
    tracing::debug!("Settings: {:?}", settings);

    match run(cli.command, &settings).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ site-metrics failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

/// Prints toasts to stderr and views to stdout. Returns false when an error toast was shown.
fn present(outcome: &DispatchOutcome, json: bool) -> Result<bool> {
    for toast in &outcome.toasts {
        eprintln!("{}", render_toast(toast));
    }

    for view in &outcome.views {
        let text = match (view, json) {
            (View::Analytics(metrics), true) => serde_json::to_string_pretty(metrics)?,
            (View::Comparison(comparison), true) => serde_json::to_string_pretty(comparison)?,
            (View::Bookmarks(bookmarks), true) => serde_json::to_string_pretty(bookmarks)?,
            (View::Analytics(metrics), false) => render_analytics(metrics),
            (View::Comparison(comparison), false) => render_comparison(comparison),
            (View::Bookmarks(bookmarks), false) => render_bookmarks(bookmarks),
        };
        println!("{}", text.trim_end());
    }

    if let Some(text) = &outcome.shared_text {
        println!("{}\n{}", text.title, text.text);
    }
    if let Some(link) = &outcome.shared_link {
        println!("{}", link);
    }

    Ok(!outcome.toasts.iter().any(|t| t.is_error()))
}

async fn run(command: Command, settings: &Settings) -> Result<bool> {
    let today = settings.today();
    let storage = LocalStorage::new(&settings.data_dir);
    let source = GeneratedSource::with_step_delay(settings.step_delay);
    let mut dashboard =
        DashboardEngine::open(storage, source, settings.share_base_url.clone()).await?;

    match command {
        Command::Analyze { website, json } => {
            let outcome = dashboard.dispatch(Action::Search(website), today).await?;
            present(&outcome, json)
        }

        Command::Compare {
            website_a,
            website_b,
            json,
        } => {
            let outcome = dashboard
                .dispatch(Action::Compare { website_a, website_b }, today)
                .await?;
            present(&outcome, json)
        }

        Command::Bookmark { action } => match action {
            BookmarkCommand::Add { website } => {
                let searched = dashboard.dispatch(Action::Search(website), today).await?;
                if searched.toasts.iter().any(|t| t.is_error()) {
                    return present(&searched, false);
                }
                let outcome = dashboard
                    .dispatch(Action::BookmarkCurrent { saved_at: Utc::now() }, today)
                    .await?;
                present(&outcome, false)
            }
            BookmarkCommand::Remove { domain } => {
                let domain = domain.trim().to_string();
                if !dashboard.state().is_bookmarked(&domain) {
                    tracing::warn!("{} is not bookmarked", domain);
                }
                let outcome = dashboard.dispatch(Action::RemoveBookmark(domain), today).await?;
                present(&outcome, false)
            }
            BookmarkCommand::List => {
                let outcome = dashboard
                    .dispatch(Action::ShowSection(Section::Bookmarks), today)
                    .await?;
                present(&outcome, false)
            }
            BookmarkCommand::View { domain } => {
                let domain = domain.trim().to_string();
                if !dashboard.state().is_bookmarked(&domain) {
                    eprintln!("❌ {} is not in your bookmarks", domain);
                    return Ok(false);
                }
                let outcome = dashboard.dispatch(Action::ViewBookmark(domain), today).await?;
                present(&outcome, false)
            }
        },

        Command::Theme { action } => {
            if let Some(ThemeCommand::Toggle) = action {
                dashboard.dispatch(Action::ToggleTheme, today).await?;
            }
            println!("Theme: {}", dashboard.state().theme);
            Ok(true)
        }

        Command::Export { website, .. } => {
            let domain = match validate_website_input("website", &website) {
                Ok(domain) => domain,
                Err(e @ SiteMetricsError::EmptyInputError { .. })
                | Err(e @ SiteMetricsError::InvalidDomainError { .. }) => {
                    eprintln!("❌ Error: {}", e.user_friendly_message());
                    return Ok(false);
                }
                Err(e) => return Err(e),
            };

            let metrics = generate_on(&domain, today);
            let output = LocalStorage::new(&settings.export_dir);
            let location = export_report(&output, &metrics, dashboard.state().theme).await?;

            tracing::info!("📁 Report saved to: {}", location);
            println!("✅ Report for {} saved to: {}", metrics.domain, location);
            Ok(true)
        }

        Command::Share { website } => {
            if let Some(website) = website {
                let searched = dashboard.dispatch(Action::Search(website), today).await?;
                if searched.toasts.iter().any(|t| t.is_error()) {
                    return present(&searched, false);
                }
            }
            let outcome = dashboard.dispatch(Action::Share, today).await?;
            present(&outcome, false)
        }
    }
}
