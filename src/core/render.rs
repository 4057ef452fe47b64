//! Plain-text views of the dashboard sections.

use crate::core::compare::{Comparison, HeadlineMetrics, Leader};
use crate::core::format::{
    avatar_letter, capitalize_first, format_currency, format_duration, format_number,
    format_percent, website_color,
};
use crate::domain::model::{Bookmark, Toast, WebsiteMetrics};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn bar(percentage: i64) -> String {
    let filled = (percentage.clamp(0, 100) as usize * BAR_WIDTH).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_analytics(metrics: &WebsiteMetrics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📊 {}", metrics.domain);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Monthly Visitors   {}", format_number(metrics.monthly_visitors));
    let _ = writeln!(out, "  Page Views         {}", format_number(metrics.page_views));
    let _ = writeln!(out, "  Bounce Rate        {}", format_percent(metrics.bounce_rate));
    let _ = writeln!(out, "  Avg. Session       {}", format_duration(metrics.avg_session_duration));
    let _ = writeln!(out, "  Est. Revenue       {}", format_currency(metrics.estimated_revenue));

    let _ = writeln!(out);
    let _ = writeln!(out, "Traffic Sources");
    for source in &metrics.traffic_sources {
        let _ = writeln!(
            out,
            "  {:<10} {:>4}  {} visits",
            capitalize_first(&source.name),
            format_percent(source.percentage),
            format_number(source.visits)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Devices");
    for device in &metrics.device_data {
        let _ = writeln!(
            out,
            "  {:<10} {} {}",
            device.name,
            bar(device.percentage),
            format_percent(device.percentage)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top Countries");
    for country in &metrics.top_countries {
        let _ = writeln!(
            out,
            "  {} {:<16} {:>4}  {} visits",
            country.flag,
            country.name,
            format_percent(country.percentage),
            format_number(country.visits)
        );
    }

    if let (Some(first), Some(last)) = (metrics.daily_traffic.first(), metrics.daily_traffic.last()) {
        let total: i64 = metrics.daily_traffic.iter().map(|d| d.visitors).sum();
        let peak = metrics.daily_traffic.iter().max_by_key(|d| d.visitors);
        let _ = writeln!(out);
        let _ = writeln!(out, "Daily Traffic ({} to {})", first.date, last.date);
        let _ = writeln!(out, "  Visitors           {}", format_number(total));
        if let Some(peak) = peak {
            let _ = writeln!(
                out,
                "  Busiest Day        {} ({} visitors)",
                peak.date,
                format_number(peak.visitors)
            );
        }
    }

    out
}

fn leader_mark(leader: Leader, side: Leader) -> &'static str {
    if leader == side {
        " ▲"
    } else {
        ""
    }
}

fn render_side(out: &mut String, label: &str, side: Leader, m: &HeadlineMetrics, c: &Comparison) {
    let _ = writeln!(out, "{} ({})", m.domain, label);
    let _ = writeln!(
        out,
        "  Monthly Visitors   {}{}",
        format_number(m.monthly_visitors),
        leader_mark(c.leaders.monthly_visitors, side)
    );
    let _ = writeln!(
        out,
        "  Page Views         {}{}",
        format_number(m.page_views),
        leader_mark(c.leaders.page_views, side)
    );
    let _ = writeln!(
        out,
        "  Bounce Rate        {}{}",
        format_percent(m.bounce_rate),
        leader_mark(c.leaders.bounce_rate, side)
    );
    let _ = writeln!(
        out,
        "  Est. Revenue       {}{}",
        format_currency(m.estimated_revenue),
        leader_mark(c.leaders.estimated_revenue, side)
    );
}

pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    render_side(&mut out, "Website A", Leader::A, &comparison.a, comparison);
    let _ = writeln!(out);
    render_side(&mut out, "Website B", Leader::B, &comparison.b, comparison);
    out
}

pub fn render_bookmarks(bookmarks: &[Bookmark]) -> String {
    if bookmarks.is_empty() {
        return "No Bookmarks Yet\nStart by searching for a website and bookmark it to keep track of its analytics.\n"
            .to_string();
    }

    let mut out = String::new();
    for bookmark in bookmarks {
        let _ = writeln!(
            out,
            "[{}] {:<28} {:>8} visitors  {:>8} revenue  saved {}  {}",
            avatar_letter(&bookmark.domain),
            bookmark.domain,
            format_number(bookmark.monthly_visitors),
            format_currency(bookmark.estimated_revenue),
            bookmark.saved_at.format("%Y-%m-%d"),
            website_color(&bookmark.domain)
        );
    }
    out
}

pub fn render_toast(toast: &Toast) -> String {
    let icon = if toast.is_error() { "❌" } else { "✅" };
    format!("{} {}: {}", icon, toast.title, toast.description)
}
