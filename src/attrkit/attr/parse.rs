//! Type inference from free-form text.
//!
//! Rules are tried in order and the first one that accepts the text wins:
//!
//! | # | Rule | Example | Tag |
//! |---|------|---------|-----|
//! | 1 | host known to the resolver | `127.0.0.1`, `localhost` | INET_ADDRESS |
//! | 2 | registered type name | `uuid::Uuid` | TYPE_REF |
//! | 3 | registered enum constant | `<enum>.POINT` | ENUM_REF |
//! | 4 | canonical UUID | `3eade434-b267-...` | UUID |
//! | 5 | integer literal that fits 64 bits | `-134` | INTEGER |
//! | 6 | decimal or exponent literal | `134e34` | REAL |
//! | 7 | date layout | `2012-11-30 18:22:34` | DATE |
//! | 8 | `true` / `false`, any case | `TrUe` | BOOLEAN |
//! | 9 | locator with a URL scheme | `http://...`, `mailto:...` | URL |
//! | 10 | any other absolute URI | `urn:isbn:...` | URI |
//! | 11 | `;`-separated numbers, by count | `1;2;3` | POINT .. POLYLINE3D |
//! | 12 | anything else | | STRING |
//!
//! Numeric lists (rule 11) are classified by token count `n`:
//!
//! - 2: POINT
//! - 3: COLOR when every token is a channel (`0..=255` integer), else POINT3D
//! - 4: COLOR when every token is a channel, else a two-point POLYLINE
//! - above 4: POLYLINE3D when divisible by 3, else POLYLINE when even
//!
//! Other counts are left as STRING.

use super::format;
use super::kind::AttributeType;
use super::value::{AttributeValue, Value};
use crate::context::AttrContext;
use crate::primitives::{Color, Point2d, Point3d};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use url::Url;

static INTEGER_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+$"));

static NUMBER_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"^-?([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)([eE][+-]?[0-9]+)?$")
});

fn is_match(pattern: &Lazy<Result<Regex, regex::Error>>, text: &str) -> bool {
    pattern
        .as_ref()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// The inference rule that classified a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseRule {
    InetAddress,
    TypeRef,
    EnumRef,
    Uuid,
    Integer,
    Real,
    Date,
    Boolean,
    Url,
    Uri,
    NumericList,
    Fallback,
}

/// Parses with the default context. Never fails; unrecognized text is a STRING.
pub fn parse(text: &str) -> AttributeValue {
    parse_with(text, AttrContext::global())
}

pub fn parse_with(text: &str, ctx: &AttrContext) -> AttributeValue {
    let (rule, value) = infer(text, ctx);
    debug!(?rule, kind = ?value.natural_type(), "parsed {:?}", text);
    AttributeValue::from_value(value)
}

/// Runs the rules against `text` and reports which one matched.
pub fn infer(text: &str, ctx: &AttrContext) -> (ParseRule, Value) {
    if text.is_empty() {
        return (ParseRule::Fallback, Value::String(String::new()));
    }
    if let Some(addr) = ctx.resolver().resolve(text) {
        return (ParseRule::InetAddress, Value::InetAddress(addr));
    }
    if let Some(type_ref) = ctx.registry().type_ref(text) {
        return (ParseRule::TypeRef, Value::TypeRef(type_ref));
    }
    if let Some(enum_ref) = ctx.registry().enum_ref(text) {
        return (ParseRule::EnumRef, Value::EnumRef(enum_ref));
    }
    if format::is_canonical_uuid(text) {
        if let Some(id) = format::parse_uuid(text) {
            return (ParseRule::Uuid, Value::Uuid(id));
        }
    }
    if is_match(&INTEGER_PATTERN, text) {
        if let Ok(n) = text.parse::<i64>() {
            return (ParseRule::Integer, Value::Integer(n));
        }
    }
    if is_match(&NUMBER_PATTERN, text) {
        if let Ok(r) = text.parse::<f64>() {
            return (ParseRule::Real, Value::Real(r));
        }
    }
    if let Some(date) = format::parse_date(text, ctx.date_formats()) {
        return (ParseRule::Date, Value::Date(date));
    }
    if text.eq_ignore_ascii_case("true") {
        return (ParseRule::Boolean, Value::Boolean(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return (ParseRule::Boolean, Value::Boolean(false));
    }
    if !text.chars().any(char::is_whitespace) {
        if let Ok(locator) = Url::parse(text) {
            if ctx.is_url_scheme(locator.scheme()) {
                return (ParseRule::Url, Value::Url(locator));
            }
            return (ParseRule::Uri, Value::Uri(locator));
        }
    }
    if let Some(value) = numeric_list(text) {
        return (ParseRule::NumericList, value);
    }
    (ParseRule::Fallback, Value::String(text.to_string()))
}

fn numeric_list(text: &str) -> Option<Value> {
    if !text.contains(';') {
        return None;
    }
    let tokens: Vec<&str> = text.split(';').map(str::trim).collect();
    if !tokens.iter().all(|t| is_match(&NUMBER_PATTERN, t)) {
        return None;
    }
    let numbers = format::parse_numbers(text)?;
    let channels: Option<Vec<u8>> = tokens.iter().map(|t| format::parse_channel(t)).collect();

    let value = match (numbers.len(), channels) {
        (2, _) => Value::Point(Point2d::new(numbers[0], numbers[1])),
        (3, Some(c)) => Value::Color(Color::rgb(c[0], c[1], c[2])),
        (3, None) => Value::Point3d(Point3d::new(numbers[0], numbers[1], numbers[2])),
        (4, Some(c)) => Value::Color(Color::new(c[0], c[1], c[2], c[3])),
        (4, None) => Value::Polyline(pairs(&numbers)),
        (n, _) if n > 4 && n % 3 == 0 => Value::Polyline3d(
            numbers
                .chunks_exact(3)
                .map(|c| Point3d::new(c[0], c[1], c[2]))
                .collect(),
        ),
        (n, _) if n > 4 && n % 2 == 0 => Value::Polyline(pairs(&numbers)),
        _ => return None,
    };
    Some(value)
}

fn pairs(numbers: &[f64]) -> Vec<Point2d> {
    numbers
        .chunks_exact(2)
        .map(|c| Point2d::new(c[0], c[1]))
        .collect()
}

impl AttributeValue {
    /// Infers the tag of `text`. See [`parse`](self::parse).
    pub fn parse(text: &str) -> AttributeValue {
        parse(text)
    }
}

impl std::str::FromStr for AttributeValue {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(parse(text))
    }
}
