use crate::models::FieldValue;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use strsim::normalized_levenshtein;

/// 四位年份的日期格式, 月在前优先 (与美式单据一致)
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%b. %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
];

/// 两位年份格式, 只在四位格式都失败后尝试
const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%m-%d-%y", "%d-%b-%y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// 带时区偏移的时间戳, 取该偏移下的日历日
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"];

/// 金额归一化: 数字直接返回; 文本去掉数字和小数点以外的字符后解析
pub fn normalize_amount(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => n.as_f64(),
        FieldValue::Text(s) => parse_amount(s),
        FieldValue::Other(_) => None,
    }
}

/// 从 OCR 文本中解析金额, 如 `$1,250.00` -> 1250.0
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// 日期归一化为 `YYYY-MM-DD`, 无法解析返回 None
pub fn normalize_date(text: &str) -> Option<String> {
    parse_date(text).map(|d| d.format("%Y-%m-%d").to_string())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text
        .trim()
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']'));
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date_naive());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            if date.year() >= 1000 {
                return Some(date);
            }
        }
    }

    SHORT_YEAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// 不区分大小写的相似度, 0-100, 基于 Levenshtein 编辑距离
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    levenshtein_ratio(&a.to_lowercase(), &b.to_lowercase())
}

/// 区分大小写的版本, 调用方已自行转小写时使用
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_strips_currency_and_separators() {
        assert_eq!(parse_amount("$1,250.00"), Some(1250.0));
        assert_eq!(parse_amount("USD 99"), Some(99.0));
        assert_eq!(normalize_amount(&FieldValue::number(250.0)), Some(250.0));
        assert_eq!(normalize_amount(&FieldValue::text("$250.00")), Some(250.0));
    }

    #[test]
    fn amount_rejects_non_numeric() {
        assert_eq!(parse_amount("Total"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(normalize_amount(&FieldValue::Other(serde_json::Value::Bool(true))), None);
    }

    #[test]
    fn dates_in_common_forms_agree() {
        let expected = Some("2024-01-15".to_string());
        assert_eq!(normalize_date("2024-01-15"), expected);
        assert_eq!(normalize_date("01/15/2024"), expected);
        assert_eq!(normalize_date("1/15/2024"), expected);
        assert_eq!(normalize_date("01-15-2024"), expected);
        assert_eq!(normalize_date("15/01/2024"), expected);
        assert_eq!(normalize_date("Jan 15, 2024"), expected);
        assert_eq!(normalize_date("January 15, 2024"), expected);
        assert_eq!(normalize_date("2024-01-15T09:30:00"), expected);
        assert_eq!(normalize_date("01/15/24"), expected);
        assert_eq!(normalize_date("(01/15/2024),"), expected);
        assert_eq!(normalize_date("2024.01.15"), expected);
    }

    #[test]
    fn offset_timestamps_keep_their_calendar_day() {
        let expected = Some("2024-01-15".to_string());
        assert_eq!(normalize_date("2024-01-15T00:00:00Z"), expected);
        assert_eq!(normalize_date("2024-01-15T00:00:00+00:00"), expected);
        assert_eq!(normalize_date("2024-01-15T23:30:00.250-05:00"), expected);
        assert_eq!(normalize_date("2024-01-15T08:00:00+0800"), expected);
    }

    #[test]
    fn non_dates_are_rejected() {
        assert_eq!(normalize_date("$250.00"), None);
        assert_eq!(normalize_date("99214"), None);
        assert_eq!(normalize_date("Office"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("13/45/2024"), None);
    }

    #[test]
    fn similarity_is_case_insensitive() {
        assert_eq!(similarity_ratio("Office Visit", "OFFICE VISIT"), 100.0);
        let r = similarity_ratio("Dr. Smith", "Dr. Smlth");
        assert!(r > 85.0 && r < 95.0, "ratio {}", r);
        assert!(similarity_ratio("Different", "Completely Made Up Service") < 75.0);
    }
}
