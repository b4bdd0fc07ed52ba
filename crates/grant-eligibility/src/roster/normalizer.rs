use chrono::NaiveDate;
use csv::StringRecord;

pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Accepts whole numbers written as integers or spreadsheet floats ("2", "2.0").
pub(crate) fn parse_children_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return Some(count);
    }

    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u32::MAX as f64 {
        Some(float as u32)
    } else {
        None
    }
}

/// Drops a midnight time suffix that spreadsheet exports append to date cells.
pub(crate) fn normalize_date_cell(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.get(..10) {
        Some(prefix)
            if trimmed.len() > 10
                && NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok()
                && trimmed[10..].trim_start_matches(['T', ' ']).starts_with("00:00") =>
        {
            prefix.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Fills a row that stops early with blank cells so it lines up with the header.
pub(crate) fn pad_record(record: &mut StringRecord, width: usize) {
    for _ in record.len()..width {
        record.push_field("");
    }
}
