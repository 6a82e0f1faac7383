use chrono::{DateTime, NaiveDateTime, Utc};

/// rao per TAO.
const RAO_PER_TAO: u128 = 1_000_000_000;

/// Left-pad a non-negative index with zeros to `width` digits.
/// Examples: `zero_pad(2, 4) == "0002"`, `zero_pad(12345, 4) == "12345"`
pub fn zero_pad(n: i64, width: usize) -> String {
    format!("{n:0width$}")
}

/// Format a rao amount as TAO, trimming trailing zeros.
/// Examples: "1 TAO", "0.5 TAO", "0 TAO"
pub fn format_tao(rao: u128) -> String {
    let whole = rao / RAO_PER_TAO;
    let frac = rao % RAO_PER_TAO;
    if frac == 0 {
        return format!("{whole} TAO");
    }
    let frac = format!("{frac:09}");
    format!("{whole}.{} TAO", frac.trim_end_matches('0'))
}

/// Group digits in threes: `1234567` -> `1,234,567`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse indexer timestamps: RFC 3339, or naive ISO (assumed UTC) as
/// SubQuery emits them.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_time_utc(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S (UTC)").to_string()
}

/// Relative time: "12 seconds ago", "3 hours ago", "in the future".
pub fn format_time_ago(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *ts).num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }
    let (n, unit) = match secs {
        0..=59 => (secs, "second"),
        60..=3_599 => (secs / 60, "minute"),
        3_600..=86_399 => (secs / 3_600, "hour"),
        86_400..=2_591_999 => (secs / 86_400, "day"),
        2_592_000..=31_535_999 => (secs / 2_592_000, "month"),
        _ => (secs / 31_536_000, "year"),
    };
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Keep the head and tail of long hashes and addresses.
pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max || max < 5 {
        return s.to_string();
    }
    let keep = (max - 1) / 2;
    let head: String = s.chars().take(keep).collect();
    let tail: String = s.chars().skip(len - keep).collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_pad_keeps_wide_numbers() {
        assert_eq!(zero_pad(2, 4), "0002");
        assert_eq!(zero_pad(0, 4), "0000");
        assert_eq!(zero_pad(12345, 4), "12345");
    }

    #[test]
    fn tao_formatting() {
        assert_eq!(format_tao(0), "0 TAO");
        assert_eq!(format_tao(1_000_000_000), "1 TAO");
        assert_eq!(format_tao(1_500_000_000), "1.5 TAO");
        assert_eq!(format_tao(1), "0.000000001 TAO");
    }

    #[test]
    fn count_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn timestamps_parse_with_and_without_zone() {
        let a = parse_timestamp("2024-03-01T10:00:00Z").unwrap();
        let b = parse_timestamp("2024-03-01T10:00:00").unwrap();
        let c = parse_timestamp("2024-03-01T10:00:00.250").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.timestamp_subsec_millis(), 250);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap();
        assert_eq!(format_time_ago(&ts, &now), "1 hour ago");
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 30).unwrap();
        assert_eq!(format_time_ago(&ts, &now), "30 seconds ago");
        assert_eq!(format_time_ago(&now, &ts), "in the future");
    }

    #[test]
    fn middle_truncation() {
        assert_eq!(truncate_middle("abcdef", 10), "abcdef");
        assert_eq!(truncate_middle("abcdefghijkl", 7), "abc…jkl");
    }
}
