//! # Typed attribute values
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`kind`] | [`AttributeType`], the closed set of tags and their defaults |
//! | [`value`] | [`Value`] payloads and the [`AttributeValue`] container with its accessors |
//! | [`cast`] | total conversion between tags |
//! | [`parse`] | tag inference from text |
//! | [`compare`] | cross-type total order, also behind `==`, `Ord` and `Hash` |
//! | [`named`] | [`Attribute`], a value under a name |
//! | [`format`] | canonical renderings and lenient decoders |
//!
//! ```
//! use attrkit::attr::{parse, AttributeType};
//!
//! let value = parse("1;2;300");
//! assert_eq!(value.kind(), AttributeType::Point3d);
//!
//! let text = value.cast_to(AttributeType::String);
//! assert_eq!(text.get_string().unwrap(), "1.0;2.0;300.0");
//! ```

pub mod cast;
pub mod compare;
pub mod error;
pub mod format;
pub mod kind;
pub mod named;
pub mod parse;
pub mod value;
mod wire;

pub use cast::{cast, cast_with};
pub use compare::{compare, compare_named, sort_attributes, sort_values};
pub use error::{AttrResult, AttributeError};
pub use kind::{AttributeType, UnknownTypeError};
pub use named::Attribute;
pub use parse::{parse, parse_with, ParseRule};
pub use value::{AttributeValue, Value};
