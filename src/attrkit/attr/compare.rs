//! Cross-type total ordering.
//!
//! Values are ranked by family first, then compared within the family:
//!
//! | Rank | Family | Members | Same-family order |
//! |------|--------|---------|-------------------|
//! | 0 | numeric | INTEGER, REAL, TIMESTAMP and DATE payloads | `f64::total_cmp` of the number (DATE as epoch millis) |
//! | 1 | text | STRING and BOOLEAN payloads | byte order of the text |
//! | 2 | structured | every other payload | tag order, then byte order of the canonical rendering |
//! | 3 | absent | unassigned values and null payloads | all equal |
//!
//! Ranking follows the payload rather than the tag, so an OBJECT holding a
//! number sorts with the numbers. A BOOLEAN compares as its text, which makes
//! `true` equal to the STRING `"true"`. Values of different families never
//! compare equal: the STRING `"0;0;0;255"` sorts before opaque black.
//!
//! `==`, `Ord` and `Hash` on [`AttributeValue`] are all defined by this ordering.

use super::format;
use super::kind::AttributeType;
use super::named::Attribute;
use super::value::{AttributeValue, Value};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

enum Family {
    Numeric(f64),
    Text(String),
    Structured(AttributeType, String),
    Absent,
}

impl Family {
    fn of(value: &AttributeValue) -> Family {
        match &value.value {
            None | Some(Value::Null) => Family::Absent,
            Some(Value::Integer(n)) | Some(Value::Timestamp(n)) => Family::Numeric(*n as f64),
            Some(Value::Real(r)) => Family::Numeric(*r),
            Some(Value::Date(d)) => Family::Numeric(d.timestamp_millis() as f64),
            Some(Value::String(text)) => Family::Text(text.clone()),
            Some(Value::Boolean(b)) => Family::Text(b.to_string()),
            Some(payload) => match (payload.natural_type(), format::render(payload)) {
                (Some(kind), Some(text)) => Family::Structured(kind, text),
                _ => Family::Absent,
            },
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Family::Numeric(_) => 0,
            Family::Text(_) => 1,
            Family::Structured(..) => 2,
            Family::Absent => 3,
        }
    }
}

/// Total order over attribute values.
#[must_use]
pub fn compare(left: &AttributeValue, right: &AttributeValue) -> Ordering {
    let (left, right) = (Family::of(left), Family::of(right));
    let rank = left.rank().cmp(&right.rank());
    if rank != Ordering::Equal {
        return rank;
    }

    match (&left, &right) {
        (Family::Numeric(a), Family::Numeric(b)) => a.total_cmp(b),
        (Family::Text(a), Family::Text(b)) => a.cmp(b),
        (Family::Structured(ka, a), Family::Structured(kb, b)) => {
            ka.cmp(kb).then_with(|| a.cmp(b))
        }
        _ => Ordering::Equal,
    }
}

/// Orders by name, then by value.
#[must_use]
pub fn compare_named(left: &Attribute, right: &Attribute) -> Ordering {
    left.name()
        .cmp(right.name())
        .then_with(|| compare(left.value(), right.value()))
}

/// Stable sort by [`compare`].
pub fn sort_values(values: &mut [AttributeValue]) {
    values.sort_by(compare);
}

/// Stable sort by [`compare_named`].
pub fn sort_attributes(attributes: &mut [Attribute]) {
    attributes.sort_by(compare_named);
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for AttributeValue {}

impl PartialOrd for AttributeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AttributeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Hash for AttributeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let family = Family::of(self);
        state.write_u8(family.rank());
        match family {
            Family::Numeric(n) => state.write_u64(n.to_bits()),
            Family::Text(text) => text.hash(state),
            Family::Structured(kind, text) => {
                kind.hash(state);
                text.hash(state);
            }
            Family::Absent => {}
        }
    }
}

macro_rules! eq_payload {
    ($($source:ty),* $(,)?) => {
        $(
            impl PartialEq<$source> for AttributeValue {
                fn eq(&self, other: &$source) -> bool {
                    *self == AttributeValue::from(other.clone())
                }
            }
        )*
    };
}

eq_payload!(bool, i64, i32, f64, String);

impl PartialEq<str> for AttributeValue {
    fn eq(&self, other: &str) -> bool {
        *self == AttributeValue::from(other)
    }
}

impl PartialEq<&str> for AttributeValue {
    fn eq(&self, other: &&str) -> bool {
        *self == AttributeValue::from(*other)
    }
}
