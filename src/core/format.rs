use crate::core::generator::hash_code;

const AVATAR_COLORS: [&str; 10] = [
    "#3b82f6", "#8b5cf6", "#10b981", "#f59e0b", "#ef4444", "#06b6d4", "#84cc16", "#f97316",
    "#ec4899", "#6366f1",
];

/// Compact count: `1.2K`, `3.4M`, `5.0B`.
///
/// The quotient is rounded to one decimal from its exact binary value, so
/// `1150` gives `1.1K` (1.15 is stored as 1.1499...). Exact binary ties such
/// as 1.25 go to the larger neighbour.
pub fn format_number(num: i64) -> String {
    const UNITS: [(i64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    for (unit, suffix) in UNITS {
        if num >= unit {
            return format!("{}{}", one_decimal(num as f64 / unit as f64), suffix);
        }
    }
    num.to_string()
}

fn one_decimal(value: f64) -> String {
    // a tenths tie is representable only as an odd multiple of 0.25
    let is_tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if is_tie {
        format!("{:.1}", (value * 10.0).ceil() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

pub fn format_currency(num: i64) -> String {
    format!("${}", format_number(num))
}

pub fn format_percent(value: i64) -> String {
    format!("{}%", value)
}

pub fn format_duration(seconds: i64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Stable avatar color for a domain.
pub fn website_color(domain: &str) -> &'static str {
    AVATAR_COLORS[hash_code(domain) as usize % AVATAR_COLORS.len()]
}

pub fn avatar_letter(domain: &str) -> String {
    domain
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
