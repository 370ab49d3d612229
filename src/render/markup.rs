use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Escape text for insertion into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Drop quote characters so a value cannot close the attribute it sits in.
/// This is not general escaping.
pub fn strip_quotes(text: &str) -> String {
    text.chars().filter(|c| *c != '"' && *c != '\'').collect()
}

/// `DD/MM/YYYY` for a publish timestamp, or `None` when it cannot be read.
///
/// Zoned timestamps keep their own offset, so the date is the one the
/// publisher stamped.
pub fn format_date_dmy(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        dt.date_naive()
    } else if let Ok(dt) = DateTime::parse_from_rfc2822(timestamp) {
        dt.date_naive()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        dt.date()
    } else if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        date
    } else {
        return None;
    };

    Some(date.format("%d/%m/%Y").to_string())
}
