//! Canonical text forms and the lenient decoders that read them back.
//!
//! The renderings here are the textual wire format: what the STRING cast
//! produces, what the comparator orders non-numeric values by, and what the
//! parser recognizes.
//!
//! | Payload | Rendering |
//! |---------|-----------|
//! | REAL | shortest decimal, always with a `.` or an exponent (`0.0`, `1.0E10`) |
//! | DATE | `yyyy-MM-dd` (UTC) |
//! | TIMESTAMP | `yyyy-MM-dd HH:mm:ss` (UTC) |
//! | COLOR | `r;g;b;a` |
//! | POINT / POINT3D | `x;y` / `x;y;z` |
//! | POLYLINE / POLYLINE3D | flattened coordinates, `""` when empty |

use super::value::{AttributeValue, Value};
use crate::primitives::{Color, Point2d, Point3d};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive date-time layouts tried after RFC 2822 and RFC 3339, read as UTC.
const DATE_TIME_LAYOUTS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const TRUE_WORDS: &[&str] = &["true", "yes", "t", "y", "oui", "o"];
const FALSE_WORDS: &[&str] = &["false", "no", "f", "n", "non"];

/// Renders a real number with at least one fractional digit.
///
/// Magnitudes outside `[1e-3, 1e7)` switch to scientific notation with an upper-case `E`.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        }
    } else {
        let text = format!("{:e}", value);
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Epoch milliseconds as `yyyy-MM-dd HH:mm:ss`; the raw number when out of range.
pub fn format_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(instant) => instant.format(TIMESTAMP_FORMAT).to_string(),
        None => millis.to_string(),
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Canonical text of a payload. `None` for a null payload.
pub fn render(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Boolean(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(r) => format_real(*r),
        Value::String(s) => s.clone(),
        Value::Date(d) => format_date(d),
        Value::Timestamp(ms) => format_timestamp(*ms),
        Value::Color(c) => c.to_string(),
        Value::Point(p) => p.to_string(),
        Value::Point3d(p) => p.to_string(),
        Value::Polyline(points) => join(points),
        Value::Polyline3d(points) => join(points),
        Value::Image(image) => image.to_string(),
        Value::Object(object) => object.to_string(),
        Value::Uri(uri) | Value::Url(uri) => uri.as_str().to_string(),
        Value::Uuid(uuid) => uuid.hyphenated().to_string(),
        Value::InetAddress(addr) => addr.to_string(),
        Value::TypeRef(type_ref) => type_ref.to_string(),
        Value::EnumRef(enum_ref) => enum_ref.to_string(),
    };
    Some(text)
}

/// Reads yes/no words in English and French, ignoring case.
pub fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

/// Splits on `;` and reads every token as a number. Fails if any token is not one.
pub fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    text.split(';')
        .map(|token| token.trim().parse::<f64>().ok())
        .collect()
}

/// Missing coordinates are zero; extra ones are ignored.
pub fn parse_point(text: &str) -> Option<Point2d> {
    let numbers = parse_numbers(text)?;
    let at = |i: usize| numbers.get(i).copied().unwrap_or(0.0);
    Some(Point2d::new(at(0), at(1)))
}

pub fn parse_point3d(text: &str) -> Option<Point3d> {
    let numbers = parse_numbers(text)?;
    let at = |i: usize| numbers.get(i).copied().unwrap_or(0.0);
    Some(Point3d::new(at(0), at(1), at(2)))
}

/// Groups coordinates in pairs; a trailing lone coordinate becomes `(x, 0)`.
pub fn parse_polyline(text: &str) -> Option<Vec<Point2d>> {
    let numbers = parse_numbers(text)?;
    Some(
        numbers
            .chunks(2)
            .map(|c| Point2d::new(c[0], c.get(1).copied().unwrap_or(0.0)))
            .collect(),
    )
}

/// Groups coordinates in triples, padding a trailing partial group with zeros.
pub fn parse_polyline3d(text: &str) -> Option<Vec<Point3d>> {
    let numbers = parse_numbers(text)?;
    Some(
        numbers
            .chunks(3)
            .map(|c| {
                Point3d::new(
                    c[0],
                    c.get(1).copied().unwrap_or(0.0),
                    c.get(2).copied().unwrap_or(0.0),
                )
            })
            .collect(),
    )
}

/// Reads a token as an 8-bit channel: an integer literal in `0..=255`.
pub fn parse_channel(token: &str) -> Option<u8> {
    let token = token.trim();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<u8>().ok()
}

/// Reads `r;g;b` or `r;g;b;a`. Fewer channels are padded with zero, alpha with 255.
pub fn parse_color(text: &str) -> Option<Color> {
    let channels: Vec<u8> = text.split(';').map(parse_channel).collect::<Option<_>>()?;
    if channels.is_empty() || channels.len() > 4 {
        return None;
    }
    let at = |i: usize| channels.get(i).copied().unwrap_or(0);
    Some(Color::new(
        at(0),
        at(1),
        at(2),
        channels.get(3).copied().unwrap_or(255),
    ))
}

/// Tries RFC 2822, RFC 3339, the built-in layouts, then `extra_formats`.
///
/// Layouts without a zone are read as UTC. A layout with only a date reads as midnight.
pub fn parse_date(text: &str, extra_formats: &[String]) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    let layouts = DATE_TIME_LAYOUTS
        .iter()
        .copied()
        .chain(std::iter::once(DATE_FORMAT))
        .chain(extra_formats.iter().map(String::as_str));
    for layout in layouts {
        if let Some(instant) = parse_with_layout(text, layout) {
            return Some(instant);
        }
    }
    None
}

fn parse_with_layout(text: &str, layout: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_str(text, layout) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, layout)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Canonical hyphenated UUID, optionally behind a `uuid:` prefix.
pub fn parse_uuid(text: &str) -> Option<Uuid> {
    let text = text.trim();
    let body = match text.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("uuid:") => &text[5..],
        _ => text,
    };
    if !is_canonical_uuid(body) {
        return None;
    }
    Uuid::parse_str(body).ok()
}

/// The 8-4-4-4-12 hex layout.
pub fn is_canonical_uuid(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

/// The canonical text; empty for unassigned values and null payloads.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_ref().and_then(render) {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from(2.0).to_string(), "2.0");
        assert_eq!(AttributeValue::new().to_string(), "");
        assert_eq!(AttributeValue::color(1, 2, 3, 4).to_string(), "1;2;3;4");
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(0.0), "0.0");
        assert_eq!(format_real(-134.5), "-134.5");
        assert_eq!(format_real(1.0), "1.0");
        assert_eq!(format_real(0.001), "0.001");
        assert_eq!(format_real(1e7), "1.0E7");
        assert_eq!(format_real(1.34e36), "1.34E36");
        assert_eq!(format_real(2.5e-4), "2.5E-4");
        assert_eq!(format_real(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_real_reads_back() {
        for x in [0.5, -3.25, 1e-9, 6.02e23, 123456.789] {
            assert_eq!(format_real(x).parse::<f64>().unwrap(), x);
        }
    }

    #[test]
    fn test_timestamp_rendering() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_354_299_754_000), "2012-11-30 18:22:34");
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(parse_boolean("TrUe"), Some(true));
        assert_eq!(parse_boolean("oui"), Some(true));
        assert_eq!(parse_boolean("N"), Some(false));
        assert_eq!(parse_boolean("maybe"), None);
    }

    #[test]
    fn test_lenient_geometry() {
        assert_eq!(parse_point("3"), Some(Point2d::new(3.0, 0.0)));
        assert_eq!(parse_point("1;2;3"), Some(Point2d::new(1.0, 2.0)));
        assert_eq!(parse_point3d(" 1 ; 2 "), Some(Point3d::new(1.0, 2.0, 0.0)));
        assert_eq!(
            parse_polyline("1;2;3"),
            Some(vec![Point2d::new(1.0, 2.0), Point2d::new(3.0, 0.0)])
        );
        assert_eq!(
            parse_polyline3d("1;2;3;4"),
            Some(vec![Point3d::new(1.0, 2.0, 3.0), Point3d::new(4.0, 0.0, 0.0)])
        );
        assert_eq!(parse_point(""), None);
        assert_eq!(parse_point("true"), None);
        assert_eq!(parse_polyline("2012-11-30"), None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(parse_color("255;0;0"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("1;2;3;4"), Some(Color::new(1, 2, 3, 4)));
        assert_eq!(parse_color("7"), Some(Color::rgb(7, 0, 0)));
        assert_eq!(parse_color("1;2;300"), None);
        assert_eq!(parse_color("1.0;2;3"), None);
        assert_eq!(parse_color("1;2;3;4;5"), None);
    }

    #[test]
    fn test_dates() {
        let expected = Utc.with_ymd_and_hms(2012, 11, 30, 18, 22, 34).unwrap();
        assert_eq!(parse_date("2012-11-30 18:22:34", &[]), Some(expected));
        assert_eq!(
            parse_date("Fri, 30 Nov 2012 18:22:42 +0100", &[]),
            Some(Utc.with_ymd_and_hms(2012, 11, 30, 17, 22, 42).unwrap())
        );
        assert_eq!(
            parse_date("2012-11-30", &[]),
            Some(Utc.with_ymd_and_hms(2012, 11, 30, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("30/11/2012", &[]), None);
        assert_eq!(
            parse_date("30/11/2012", &["%d/%m/%Y".to_string()]),
            Some(Utc.with_ymd_and_hms(2012, 11, 30, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("134", &[]), None);
    }

    #[test]
    fn test_uuid_forms() {
        let text = "3eade434-b267-4ffa-a574-2e2cbff0151a";
        assert!(parse_uuid(text).is_some());
        assert_eq!(parse_uuid(&format!("uuid:{}", text)), parse_uuid(text));
        assert!(parse_uuid("3eade434b2674ffaa5742e2cbff0151a").is_none());
        assert!(parse_uuid("{3eade434-b267-4ffa-a574-2e2cbff0151a}").is_none());
    }
}
