//! The cast engine.
//!
//! `cast(value, target)` re-tags a value while keeping as much of its data as the
//! target shape can hold. It is total:
//!
//! - an unassigned value stays unassigned and only changes tag,
//! - an assigned value is read through the target's accessor,
//! - when that read fails, the result is the target's default and stays assigned.
//!
//! The per-pair rules therefore live in the accessors of
//! [`AttributeValue`](super::AttributeValue). This module only decides what a
//! failed read turns into.

use super::error::AttrResult;
use super::kind::AttributeType;
use super::value::{AttributeValue, Value};
use crate::context::AttrContext;
use tracing::trace;

/// Casts using the default context.
pub fn cast(value: &AttributeValue, target: AttributeType) -> AttributeValue {
    cast_with(value, target, AttrContext::global())
}

pub fn cast_with(value: &AttributeValue, target: AttributeType, ctx: &AttrContext) -> AttributeValue {
    let mut result = value.clone();
    result.cast_with(target, ctx);
    result
}

/// Reads `value` in the shape of `target`.
fn convert(value: &AttributeValue, target: AttributeType, ctx: &AttrContext) -> AttrResult<Value> {
    let converted = match target {
        AttributeType::Boolean => Value::Boolean(value.get_boolean()?),
        AttributeType::Integer => Value::Integer(value.get_integer()?),
        AttributeType::Real => Value::Real(value.get_real()?),
        AttributeType::String => Value::String(value.get_string()?),
        AttributeType::Date => Value::Date(value.get_date_with(ctx)?),
        AttributeType::Timestamp => Value::Timestamp(value.get_timestamp()?),
        AttributeType::Color => Value::Color(value.get_color()?),
        AttributeType::Point => Value::Point(value.get_point()?),
        AttributeType::Point3d => Value::Point3d(value.get_point3d()?),
        AttributeType::Polyline => Value::Polyline(value.get_polyline()?),
        AttributeType::Polyline3d => Value::Polyline3d(value.get_polyline3d()?),
        AttributeType::Image => Value::Image(value.get_image()?),
        AttributeType::Object => value.get_object()?.unwrap_or(Value::Null),
        AttributeType::Uri => Value::Uri(value.get_uri()?),
        AttributeType::Url => Value::Url(value.get_url_with(ctx)?),
        AttributeType::Uuid => Value::Uuid(value.get_uuid()?),
        AttributeType::InetAddress => Value::InetAddress(value.get_inet_address_with(ctx)?),
        AttributeType::TypeRef => Value::TypeRef(value.get_type_ref_with(ctx)?),
        AttributeType::EnumRef => Value::EnumRef(value.get_enum_ref_with(ctx)?),
    };
    Ok(converted)
}

impl AttributeValue {
    /// Casts in place. Returns `false` when the payload could not be carried over
    /// and the target default was used instead.
    pub fn cast(&mut self, target: AttributeType) -> bool {
        self.cast_with(target, AttrContext::global())
    }

    pub fn cast_with(&mut self, target: AttributeType, ctx: &AttrContext) -> bool {
        if !self.is_assigned() {
            self.kind = target;
            return true;
        }
        match convert(self, target, ctx) {
            Ok(converted) => {
                self.kind = target;
                self.value = Some(converted);
                true
            }
            Err(reason) => {
                trace!(from = %self.kind, to = %target, %reason, "cast fell back to default");
                self.kind = target;
                self.value = Some(target.default_value_at(ctx.clock()));
                false
            }
        }
    }

    /// A casted copy; `self` is untouched.
    pub fn cast_to(&self, target: AttributeType) -> AttributeValue {
        cast(self, target)
    }

    /// Replaces this value with `value` cast into `target`.
    pub fn cast_and_set(&mut self, target: AttributeType, value: impl Into<AttributeValue>) -> bool {
        *self = value.into();
        self.cast(target)
    }
}
