// ── pt-BR display formatting ──

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder for an absent date.
pub const NOT_INFORMED: &str = "Não informado";

/// Render an ISO date (`2024-02-01`, optionally with a time part) as
/// `01/02/2024`. Unparseable input is returned as given.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return NOT_INFORMED.into();
    };
    if let Some(date) = parse_date(raw) {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Some(dt) = parse_date_time(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    raw.to_owned()
}

/// Render an ISO timestamp as `01/02/2024 14:30:00`. A bare date renders
/// at midnight.
pub fn format_date_time(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return NOT_INFORMED.into();
    };
    let parsed = parse_date_time(raw).or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)));
    match parsed {
        Some(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        None => raw.to_owned(),
    }
}

/// Fixed-point number formatting.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
