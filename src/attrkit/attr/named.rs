//! Named attribute values.

use super::compare::compare_named;
use super::parse::parse_with;
use super::value::AttributeValue;
use crate::context::AttrContext;
use std::cmp::Ordering;
use std::fmt;

/// An attribute value under a name. Ordered by name, then by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    value: AttributeValue,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Reads `name=text`, inferring the value's tag from `text`.
    ///
    /// Text without `=` is a name with an unassigned value.
    pub fn parse_pair(pair: &str, ctx: &AttrContext) -> Attribute {
        match pair.split_once('=') {
            Some((name, text)) => Attribute::new(name, parse_with(text, ctx)),
            None => Attribute::new(pair, AttributeValue::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut AttributeValue {
        &mut self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn into_parts(self) -> (String, AttributeValue) {
        (self.name, self.value)
    }
}

impl PartialOrd for Attribute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attribute {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_named(self, other)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
