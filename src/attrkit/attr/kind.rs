//! The closed set of attribute types.
//!
//! Every [`AttributeValue`](super::AttributeValue) is tagged with exactly one
//! [`AttributeType`]. The tag decides the payload shape, the default value, and
//! which accessors succeed without conversion.
//!
//! | Tag | Default | Base | Null allowed |
//! |-----|---------|------|--------------|
//! | BOOLEAN | `false` | yes | no |
//! | INTEGER | `0` | yes | no |
//! | REAL | `0.0` | yes | no |
//! | STRING | `""` | yes | no |
//! | DATE | now | no | no |
//! | TIMESTAMP | now (epoch ms) | no | no |
//! | COLOR | opaque black | no | no |
//! | POINT / POINT3D | origin | no | no |
//! | POLYLINE / POLYLINE3D | empty | no | no |
//! | IMAGE | null | no | yes |
//! | OBJECT | null | no | yes |
//! | URI / URL | null | no | yes |
//! | UUID | nil UUID | no | no |
//! | INET_ADDRESS | `127.0.0.1` | no | yes |
//! | TYPE_REF / ENUM_REF | null | no | yes |

use super::value::Value;
use crate::clock::{Clock, SystemClock};
use crate::primitives::{Color, Point2d, Point3d};
use crate::registry::EnumConstants;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AttributeType {
    Boolean,
    Integer,
    Real,
    String,
    Date,
    Timestamp,
    Color,
    Point,
    Point3d,
    Polyline,
    Polyline3d,
    Image,
    Object,
    Uri,
    Url,
    Uuid,
    InetAddress,
    TypeRef,
    EnumRef,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown attribute type: {0}")]
pub struct UnknownTypeError(pub String);

impl AttributeType {
    pub const ALL: [AttributeType; 19] = [
        AttributeType::Boolean,
        AttributeType::Integer,
        AttributeType::Real,
        AttributeType::String,
        AttributeType::Date,
        AttributeType::Timestamp,
        AttributeType::Color,
        AttributeType::Point,
        AttributeType::Point3d,
        AttributeType::Polyline,
        AttributeType::Polyline3d,
        AttributeType::Image,
        AttributeType::Object,
        AttributeType::Uri,
        AttributeType::Url,
        AttributeType::Uuid,
        AttributeType::InetAddress,
        AttributeType::TypeRef,
        AttributeType::EnumRef,
    ];

    /// Stable tag name, as used on the wire and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            AttributeType::Boolean => "BOOLEAN",
            AttributeType::Integer => "INTEGER",
            AttributeType::Real => "REAL",
            AttributeType::String => "STRING",
            AttributeType::Date => "DATE",
            AttributeType::Timestamp => "TIMESTAMP",
            AttributeType::Color => "COLOR",
            AttributeType::Point => "POINT",
            AttributeType::Point3d => "POINT3D",
            AttributeType::Polyline => "POLYLINE",
            AttributeType::Polyline3d => "POLYLINE3D",
            AttributeType::Image => "IMAGE",
            AttributeType::Object => "OBJECT",
            AttributeType::Uri => "URI",
            AttributeType::Url => "URL",
            AttributeType::Uuid => "UUID",
            AttributeType::InetAddress => "INET_ADDRESS",
            AttributeType::TypeRef => "TYPE_REF",
            AttributeType::EnumRef => "ENUM_REF",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            AttributeType::Boolean => "Boolean",
            AttributeType::Integer => "Integer",
            AttributeType::Real => "Real number",
            AttributeType::String => "Text",
            AttributeType::Date => "Date",
            AttributeType::Timestamp => "Timestamp",
            AttributeType::Color => "Color",
            AttributeType::Point => "2D point",
            AttributeType::Point3d => "3D point",
            AttributeType::Polyline => "2D polyline",
            AttributeType::Polyline3d => "3D polyline",
            AttributeType::Image => "Image",
            AttributeType::Object => "Object",
            AttributeType::Uri => "URI",
            AttributeType::Url => "URL",
            AttributeType::Uuid => "UUID",
            AttributeType::InetAddress => "Network address",
            AttributeType::TypeRef => "Type",
            AttributeType::EnumRef => "Enumeration constant",
        }
    }

    /// Tag at position `index` in [`AttributeType::ALL`]; OBJECT when out of range.
    pub fn from_index(index: usize) -> AttributeType {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(AttributeType::Object)
    }

    /// Scalar tags: BOOLEAN, INTEGER, REAL and STRING.
    pub const fn is_base_type(self) -> bool {
        matches!(
            self,
            AttributeType::Boolean
                | AttributeType::Integer
                | AttributeType::Real
                | AttributeType::String
        )
    }

    pub const fn is_number_type(self) -> bool {
        matches!(
            self,
            AttributeType::Integer | AttributeType::Real | AttributeType::Timestamp
        )
    }

    /// Whether an assigned value of this tag may carry a null payload.
    pub const fn is_null_allowed(self) -> bool {
        matches!(
            self,
            AttributeType::Image
                | AttributeType::Object
                | AttributeType::Uri
                | AttributeType::Url
                | AttributeType::InetAddress
                | AttributeType::TypeRef
                | AttributeType::EnumRef
        )
    }

    /// Whether at least one value of `source` casts into this tag without falling
    /// back to the default. A `true` answer says nothing about any particular value.
    pub fn is_assignable_from(self, source: AttributeType) -> bool {
        use AttributeType as T;
        match self {
            T::Integer | T::Real => matches!(
                source,
                T::Integer | T::Real | T::Timestamp | T::String | T::Date | T::Boolean | T::Color | T::EnumRef | T::Object
            ),
            T::Timestamp => matches!(
                source,
                T::Integer | T::Real | T::Timestamp | T::String | T::Date | T::Boolean | T::Color | T::Object
            ),
            T::Boolean => matches!(source, T::Boolean | T::String | T::Integer | T::Timestamp | T::Real | T::Object),
            T::Date => matches!(source, T::Date | T::Real | T::Integer | T::Timestamp | T::String | T::Object),
            T::Point | T::Point3d => matches!(
                source,
                T::Point | T::Point3d | T::Color | T::Real | T::Integer | T::Timestamp | T::Date | T::String | T::Object
            ),
            T::Color => matches!(
                source,
                T::Color | T::Point | T::Point3d | T::String | T::Integer | T::Real | T::Timestamp | T::Date | T::Object
            ),
            T::Url => matches!(source, T::Uri | T::Url | T::InetAddress | T::String | T::Object),
            T::Uri => matches!(source, T::Uri | T::Url | T::InetAddress | T::String | T::Uuid | T::Object),
            T::Polyline | T::Polyline3d => matches!(
                source,
                T::Polyline | T::Polyline3d | T::Point | T::Point3d | T::String | T::Object
            ),
            T::Image => matches!(source, T::Image | T::Object),
            T::InetAddress => matches!(source, T::InetAddress | T::String | T::Url | T::Uri | T::Object),
            T::EnumRef => matches!(source, T::EnumRef | T::String | T::Object),
            T::TypeRef => matches!(source, T::TypeRef | T::String | T::Object),
            T::Uuid | T::String | T::Object => true,
        }
    }

    /// Default payload, reading the system clock for DATE and TIMESTAMP.
    pub fn default_value(self) -> Value {
        self.default_value_at(&SystemClock)
    }

    /// Default payload. DATE and TIMESTAMP sample `clock` on every call.
    pub fn default_value_at(self, clock: &dyn Clock) -> Value {
        match self {
            AttributeType::Boolean => Value::Boolean(false),
            AttributeType::Integer => Value::Integer(0),
            AttributeType::Real => Value::Real(0.0),
            AttributeType::String => Value::String(String::new()),
            AttributeType::Date => Value::Date(clock.now()),
            AttributeType::Timestamp => Value::Timestamp(clock.now_millis()),
            AttributeType::Color => Value::Color(Color::BLACK),
            AttributeType::Point => Value::Point(Point2d::ORIGIN),
            AttributeType::Point3d => Value::Point3d(Point3d::ORIGIN),
            AttributeType::Polyline => Value::Polyline(Vec::new()),
            AttributeType::Polyline3d => Value::Polyline3d(Vec::new()),
            AttributeType::Uuid => Value::Uuid(Uuid::nil()),
            AttributeType::InetAddress => Value::InetAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            AttributeType::Image
            | AttributeType::Object
            | AttributeType::Uri
            | AttributeType::Url
            | AttributeType::TypeRef
            | AttributeType::EnumRef => Value::Null,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeType {
    type Err = UnknownTypeError;

    /// Accepts tag names in any case, with or without underscores, plus a few
    /// common aliases (`int`, `float`, `bool`, `ip`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();
        if let Some(kind) = Self::ALL
            .iter()
            .find(|kind| kind.name().replace('_', "") == wanted)
        {
            return Ok(*kind);
        }
        let alias = match wanted.as_str() {
            "BOOL" => AttributeType::Boolean,
            "INT" | "LONG" => AttributeType::Integer,
            "FLOAT" | "DOUBLE" | "NUMBER" => AttributeType::Real,
            "STR" | "TEXT" => AttributeType::String,
            "POINT2D" => AttributeType::Point,
            "POLYLINE2D" => AttributeType::Polyline,
            "ICON" => AttributeType::Image,
            "INET" | "IP" => AttributeType::InetAddress,
            "TYPE" => AttributeType::TypeRef,
            "ENUM" | "ENUMERATION" => AttributeType::EnumRef,
            _ => return Err(UnknownTypeError(s.to_string())),
        };
        Ok(alias)
    }
}

impl EnumConstants for AttributeType {
    fn constant_names() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.name().to_string()).collect()
    }
}
