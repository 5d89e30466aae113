use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::{AppError, AppResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Canonical stored form of a report date: RFC 3339, UTC, millisecond precision.
/// A bare `YYYY-MM-DD` is taken as midnight UTC.
pub fn normalize_date(input: &str) -> AppResult<String> {
    let input = input.trim();
    let instant: DateTime<Utc> = if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        day.and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::InvalidInput(format!("invalid date: {}", input)))?
            .and_utc()
    } else {
        DateTime::parse_from_rfc3339(input)
            .map_err(|e| AppError::InvalidInput(format!("invalid date '{}': {}", input, e)))?
            .with_timezone(&Utc)
    };
    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Short calendar label for a stored date, e.g. `3/1/2024`. Unparseable input
/// is returned as-is.
pub fn display_date(stored: &str) -> String {
    match DateTime::parse_from_rfc3339(stored) {
        Ok(dt) => dt.with_timezone(&Utc).format("%-m/%-d/%Y").to_string(),
        Err(_) => stored.to_string(),
    }
}

/// Today's date as the form's date field expects it.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Inline text form of an image: `data:<type>;base64,<payload>`.
pub fn to_data_url(content_type: &str, data: &[u8]) -> String {
    let content_type = if content_type.trim().is_empty() {
        FALLBACK_CONTENT_TYPE
    } else {
        content_type.trim()
    };
    format!("data:{};base64,{}", content_type, BASE64.encode(data))
}
