//! The typed attribute value.
//!
//! An [`AttributeValue`] is a type tag plus an assignment state. When assigned it
//! holds a [`Value`] whose variant matches the tag. The one exception is OBJECT,
//! which may hold any payload. Null-allowed tags may also hold [`Value::Null`].
//!
//! ## Reading
//!
//! Accessors (`get_*`) reinterpret the payload into the requested shape. They fail
//! with [`AttributeError::NotInitialized`] on an unassigned value or a null
//! payload, and with [`AttributeError::InvalidType`] when the payload has no
//! meaning in the requested shape. Reads never change the value.
//!
//! ## Writing
//!
//! Setters (`set_*`) replace both the tag and the payload. Changing the tag while
//! keeping the data is the job of [`cast`](super::cast).

use super::error::{AttrResult, AttributeError};
use super::format;
use super::kind::AttributeType;
use crate::clock::Clock;
use crate::context::AttrContext;
use crate::primitives::{Color, EnumRef, Image, Opaque, Point2d, Point3d, TypeRef};
use chrono::{DateTime, TimeZone, Utc};
use std::net::IpAddr;
use url::{Host, Url};
use uuid::Uuid;

/// Scheme used when an address is turned into a URI or URL.
pub const DEFAULT_SCHEME: &str = "file";

/// Payload of an assigned attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Date(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    Color(Color),
    Point(Point2d),
    Point3d(Point3d),
    Polyline(Vec<Point2d>),
    Polyline3d(Vec<Point3d>),
    Image(Image),
    Object(Opaque),
    Uri(Url),
    Url(Url),
    Uuid(Uuid),
    InetAddress(IpAddr),
    TypeRef(TypeRef),
    EnumRef(EnumRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The tag this payload belongs to; `None` for null.
    pub fn natural_type(&self) -> Option<AttributeType> {
        let kind = match self {
            Value::Null => return None,
            Value::Boolean(_) => AttributeType::Boolean,
            Value::Integer(_) => AttributeType::Integer,
            Value::Real(_) => AttributeType::Real,
            Value::String(_) => AttributeType::String,
            Value::Date(_) => AttributeType::Date,
            Value::Timestamp(_) => AttributeType::Timestamp,
            Value::Color(_) => AttributeType::Color,
            Value::Point(_) => AttributeType::Point,
            Value::Point3d(_) => AttributeType::Point3d,
            Value::Polyline(_) => AttributeType::Polyline,
            Value::Polyline3d(_) => AttributeType::Polyline3d,
            Value::Image(_) => AttributeType::Image,
            Value::Object(_) => AttributeType::Object,
            Value::Uri(_) => AttributeType::Uri,
            Value::Url(_) => AttributeType::Url,
            Value::Uuid(_) => AttributeType::Uuid,
            Value::InetAddress(_) => AttributeType::InetAddress,
            Value::TypeRef(_) => AttributeType::TypeRef,
            Value::EnumRef(_) => AttributeType::EnumRef,
        };
        Some(kind)
    }
}

/// A dynamically typed attribute value.
///
/// Construction never fails:
///
/// - [`AttributeValue::empty`] gives an unassigned value of a tag,
/// - `From` impls and [`AttributeValue::from_value`] tag a payload with its natural type,
/// - [`AttributeValue::with_value`] casts a payload into a chosen tag,
/// - [`AttributeValue::parse`] infers the tag from text.
#[derive(Debug, Clone)]
pub struct AttributeValue {
    pub(crate) kind: AttributeType,
    pub(crate) value: Option<Value>,
}

impl Default for AttributeValue {
    /// An unassigned OBJECT.
    fn default() -> Self {
        Self::empty(AttributeType::Object)
    }
}

impl AttributeValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty(kind: AttributeType) -> Self {
        Self { kind, value: None }
    }

    /// An assigned value holding the default of `kind`.
    pub fn with_default(kind: AttributeType) -> Self {
        Self::with_default_at(kind, AttrContext::global().clock())
    }

    pub fn with_default_at(kind: AttributeType, clock: &dyn Clock) -> Self {
        Self {
            kind,
            value: Some(kind.default_value_at(clock)),
        }
    }

    /// Tags `value` with its natural type. A null payload gives an unassigned OBJECT.
    pub fn from_value(value: Value) -> Self {
        match value.natural_type() {
            Some(kind) => Self {
                kind,
                value: Some(value),
            },
            None => Self::default(),
        }
    }

    /// Casts `value` into `kind`. A null payload gives an unassigned value of `kind`.
    pub fn with_value(kind: AttributeType, value: impl Into<Value>) -> Self {
        super::cast::cast(&Self::from_value(value.into()), kind)
    }

    pub fn timestamp(millis: i64) -> Self {
        Self::from_value(Value::Timestamp(millis))
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::from_value(Value::Point(Point2d::new(x, y)))
    }

    pub fn point3d(x: f64, y: f64, z: f64) -> Self {
        Self::from_value(Value::Point3d(Point3d::new(x, y, z)))
    }

    pub fn color(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::from_value(Value::Color(Color::new(red, green, blue, alpha)))
    }

    pub fn uri(uri: Url) -> Self {
        Self::from_value(Value::Uri(uri))
    }

    pub fn url(url: Url) -> Self {
        Self::from_value(Value::Url(url))
    }

    pub fn object(object: Opaque) -> Self {
        Self::from_value(Value::Object(object))
    }

    pub fn kind(&self) -> AttributeType {
        self.kind
    }

    pub fn is_assigned(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_base_type(&self) -> bool {
        self.kind.is_base_type()
    }

    /// True for every non-base tag, assigned or not.
    pub fn is_object_value(&self) -> bool {
        !self.kind.is_base_type()
    }

    pub fn is_null_allowed(&self) -> bool {
        self.kind.is_null_allowed()
    }

    /// Tag-level check; see [`AttributeType::is_assignable_from`].
    pub fn is_assignable_from(&self, other: &AttributeValue) -> bool {
        self.kind.is_assignable_from(other.kind)
    }

    /// The raw payload, which may be [`Value::Null`] for null-allowed tags.
    pub fn value(&self) -> AttrResult<&Value> {
        self.value
            .as_ref()
            .ok_or(AttributeError::NotInitialized { kind: self.kind })
    }

    fn payload(&self) -> AttrResult<&Value> {
        match &self.value {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(AttributeError::NotInitialized { kind: self.kind }),
        }
    }

    fn mismatch(&self, requested: AttributeType) -> AttributeError {
        AttributeError::InvalidType {
            found: self.kind,
            requested,
        }
    }

    pub fn get_boolean(&self) -> AttrResult<bool> {
        let wanted = AttributeType::Boolean;
        match self.payload()? {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(n) | Value::Timestamp(n) => Ok(*n != 0),
            Value::Real(r) => Ok(*r != 0.0),
            Value::String(s) => format::parse_boolean(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_integer(&self) -> AttrResult<i64> {
        let wanted = AttributeType::Integer;
        match self.payload()? {
            Value::Integer(n) | Value::Timestamp(n) => Ok(*n),
            Value::Real(r) => Ok(*r as i64),
            Value::Boolean(b) => Ok(i64::from(*b)),
            Value::Date(d) => Ok(d.timestamp_millis()),
            Value::Color(c) => Ok(i64::from(c.to_argb())),
            Value::EnumRef(e) => Ok(e.ordinal as i64),
            Value::String(s) => s.parse::<i64>().map_err(|_| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_real(&self) -> AttrResult<f64> {
        let wanted = AttributeType::Real;
        match self.payload()? {
            Value::Real(r) => Ok(*r),
            Value::Integer(n) | Value::Timestamp(n) => Ok(*n as f64),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Date(d) => Ok(d.timestamp_millis() as f64),
            Value::Color(c) => Ok(f64::from(c.to_argb())),
            Value::EnumRef(e) => Ok(e.ordinal as f64),
            Value::String(s) => s.parse::<f64>().map_err(|_| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    /// Canonical rendering of the payload; see [`format`](super::format).
    pub fn get_string(&self) -> AttrResult<String> {
        let payload = self.payload()?;
        format::render(payload).ok_or(AttributeError::NotInitialized { kind: self.kind })
    }

    pub fn get_date(&self) -> AttrResult<DateTime<Utc>> {
        self.get_date_with(AttrContext::global())
    }

    /// Instants and epoch milliseconds convert; text must match a date layout.
    pub fn get_date_with(&self, ctx: &AttrContext) -> AttrResult<DateTime<Utc>> {
        let wanted = AttributeType::Date;
        let from_millis = |millis: i64| {
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or_else(|| self.mismatch(wanted))
        };
        match self.payload()? {
            Value::Date(d) => Ok(*d),
            Value::Integer(n) | Value::Timestamp(n) => from_millis(*n),
            Value::Real(r) => from_millis(*r as i64),
            Value::String(s) => {
                format::parse_date(s, ctx.date_formats()).ok_or_else(|| self.mismatch(wanted))
            }
            _ => Err(self.mismatch(wanted)),
        }
    }

    /// Epoch milliseconds. Text must be an integer literal.
    pub fn get_timestamp(&self) -> AttrResult<i64> {
        let wanted = AttributeType::Timestamp;
        match self.payload()? {
            Value::Timestamp(n) | Value::Integer(n) => Ok(*n),
            Value::Real(r) => Ok(*r as i64),
            Value::Date(d) => Ok(d.timestamp_millis()),
            Value::String(s) => s.parse::<i64>().map_err(|_| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_color(&self) -> AttrResult<Color> {
        let wanted = AttributeType::Color;
        match self.payload()? {
            Value::Color(c) => Ok(*c),
            Value::Point(p) => Ok(Color::rgb(Color::channel(p.x), Color::channel(p.y), 0)),
            Value::Point3d(p) => Ok(Color::rgb(
                Color::channel(p.x),
                Color::channel(p.y),
                Color::channel(p.z),
            )),
            Value::Integer(n) | Value::Timestamp(n) => Ok(Color::from_rgb_bits(*n)),
            Value::Real(r) => Ok(Color::from_rgb_bits(*r as i64)),
            Value::String(s) => format::parse_color(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    /// Numbers and instants read as `(n, 0)`; a color reads as `(red, green)`.
    pub fn get_point(&self) -> AttrResult<Point2d> {
        let wanted = AttributeType::Point;
        match self.payload()? {
            Value::Point(p) => Ok(*p),
            Value::Point3d(p) => Ok(p.project()),
            Value::Color(c) => Ok(Point2d::new(f64::from(c.red), f64::from(c.green))),
            Value::Integer(n) | Value::Timestamp(n) => Ok(Point2d::new(*n as f64, 0.0)),
            Value::Real(r) => Ok(Point2d::new(*r, 0.0)),
            Value::Date(d) => Ok(Point2d::new(d.timestamp_millis() as f64, 0.0)),
            Value::String(s) => format::parse_point(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_point3d(&self) -> AttrResult<Point3d> {
        let wanted = AttributeType::Point3d;
        match self.payload()? {
            Value::Point3d(p) => Ok(*p),
            Value::Point(p) => Ok(p.extend()),
            Value::Color(c) => Ok(Point3d::new(
                f64::from(c.red),
                f64::from(c.green),
                f64::from(c.blue),
            )),
            Value::Integer(n) | Value::Timestamp(n) => Ok(Point3d::new(*n as f64, 0.0, 0.0)),
            Value::Real(r) => Ok(Point3d::new(*r, 0.0, 0.0)),
            Value::Date(d) => Ok(Point3d::new(d.timestamp_millis() as f64, 0.0, 0.0)),
            Value::String(s) => format::parse_point3d(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_polyline(&self) -> AttrResult<Vec<Point2d>> {
        let wanted = AttributeType::Polyline;
        match self.payload()? {
            Value::Polyline(points) => Ok(points.clone()),
            Value::Polyline3d(points) => Ok(points.iter().map(|p| p.project()).collect()),
            Value::Point(p) => Ok(vec![*p]),
            Value::Point3d(p) => Ok(vec![p.project()]),
            Value::String(s) => format::parse_polyline(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_polyline3d(&self) -> AttrResult<Vec<Point3d>> {
        let wanted = AttributeType::Polyline3d;
        match self.payload()? {
            Value::Polyline3d(points) => Ok(points.clone()),
            Value::Polyline(points) => Ok(points.iter().map(|p| p.extend()).collect()),
            Value::Point3d(p) => Ok(vec![*p]),
            Value::Point(p) => Ok(vec![p.extend()]),
            Value::String(s) => {
                format::parse_polyline3d(s).ok_or_else(|| self.mismatch(wanted))
            }
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_image(&self) -> AttrResult<Image> {
        match self.payload()? {
            Value::Image(image) => Ok(image.clone()),
            _ => Err(self.mismatch(AttributeType::Image)),
        }
    }

    /// The backing object of a structured value.
    ///
    /// Base tags fail with `InvalidType`. Any other tag yields `None` when
    /// unassigned or null, never `NotInitialized`.
    pub fn get_object(&self) -> AttrResult<Option<Value>> {
        if self.kind.is_base_type() {
            return Err(self.mismatch(AttributeType::Object));
        }
        Ok(self.value.as_ref().filter(|v| !v.is_null()).cloned())
    }

    pub fn get_uuid(&self) -> AttrResult<Uuid> {
        let wanted = AttributeType::Uuid;
        match self.payload()? {
            Value::Uuid(id) => Ok(*id),
            Value::Uri(uri) | Value::Url(uri) if uri.scheme() == "uuid" => {
                format::parse_uuid(uri.path()).ok_or_else(|| self.mismatch(wanted))
            }
            Value::String(s) => format::parse_uuid(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_uri(&self) -> AttrResult<Url> {
        let wanted = AttributeType::Uri;
        match self.payload()? {
            Value::Uri(uri) | Value::Url(uri) => Ok(uri.clone()),
            Value::Uuid(id) => {
                Url::parse(&format!("uuid:{}", id.hyphenated())).map_err(|_| self.mismatch(wanted))
            }
            Value::InetAddress(addr) => address_url(*addr).ok_or_else(|| self.mismatch(wanted)),
            Value::String(s) => Url::parse(s).map_err(|_| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_url(&self) -> AttrResult<Url> {
        self.get_url_with(AttrContext::global())
    }

    /// Only locators whose scheme the context treats as URL qualify.
    pub fn get_url_with(&self, ctx: &AttrContext) -> AttrResult<Url> {
        let wanted = AttributeType::Url;
        let locator = |url: Url| {
            if ctx.is_url_scheme(url.scheme()) {
                Ok(url)
            } else {
                Err(self.mismatch(wanted))
            }
        };
        match self.payload()? {
            Value::Url(url) => Ok(url.clone()),
            Value::Uri(uri) => locator(uri.clone()),
            Value::InetAddress(addr) => address_url(*addr).ok_or_else(|| self.mismatch(wanted)),
            Value::String(s) => Url::parse(s)
                .map_err(|_| self.mismatch(wanted))
                .and_then(locator),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_inet_address(&self) -> AttrResult<IpAddr> {
        self.get_inet_address_with(AttrContext::global())
    }

    pub fn get_inet_address_with(&self, ctx: &AttrContext) -> AttrResult<IpAddr> {
        let wanted = AttributeType::InetAddress;
        let resolved = match self.payload()? {
            Value::InetAddress(addr) => Some(*addr),
            Value::String(s) => ctx.resolver().resolve(s),
            Value::Uri(url) | Value::Url(url) => match url.host() {
                Some(Host::Ipv4(addr)) => Some(IpAddr::V4(addr)),
                Some(Host::Ipv6(addr)) => Some(IpAddr::V6(addr)),
                Some(Host::Domain(name)) => ctx.resolver().resolve(name),
                None => None,
            },
            _ => None,
        };
        resolved.ok_or_else(|| self.mismatch(wanted))
    }

    pub fn get_type_ref(&self) -> AttrResult<TypeRef> {
        self.get_type_ref_with(AttrContext::global())
    }

    pub fn get_type_ref_with(&self, ctx: &AttrContext) -> AttrResult<TypeRef> {
        let wanted = AttributeType::TypeRef;
        match self.payload()? {
            Value::TypeRef(t) => Ok(t.clone()),
            Value::EnumRef(e) => Ok(TypeRef::new(e.type_name.clone())),
            Value::String(s) => ctx.registry().type_ref(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    pub fn get_enum_ref(&self) -> AttrResult<EnumRef> {
        self.get_enum_ref_with(AttrContext::global())
    }

    pub fn get_enum_ref_with(&self, ctx: &AttrContext) -> AttrResult<EnumRef> {
        let wanted = AttributeType::EnumRef;
        match self.payload()? {
            Value::EnumRef(e) => Ok(e.clone()),
            Value::String(s) => ctx.registry().enum_ref(s).ok_or_else(|| self.mismatch(wanted)),
            _ => Err(self.mismatch(wanted)),
        }
    }

    fn assign(&mut self, kind: AttributeType, value: Value) {
        self.kind = kind;
        self.value = Some(value);
    }

    pub fn set_boolean(&mut self, value: bool) {
        self.assign(AttributeType::Boolean, Value::Boolean(value));
    }

    pub fn set_integer(&mut self, value: i64) {
        self.assign(AttributeType::Integer, Value::Integer(value));
    }

    pub fn set_real(&mut self, value: f64) {
        self.assign(AttributeType::Real, Value::Real(value));
    }

    pub fn set_string(&mut self, value: impl Into<String>) {
        self.assign(AttributeType::String, Value::String(value.into()));
    }

    pub fn set_date(&mut self, value: DateTime<Utc>) {
        self.assign(AttributeType::Date, Value::Date(value));
    }

    pub fn set_timestamp(&mut self, millis: i64) {
        self.assign(AttributeType::Timestamp, Value::Timestamp(millis));
    }

    pub fn set_color(&mut self, value: Color) {
        self.assign(AttributeType::Color, Value::Color(value));
    }

    pub fn set_point(&mut self, value: Point2d) {
        self.assign(AttributeType::Point, Value::Point(value));
    }

    pub fn set_point3d(&mut self, value: Point3d) {
        self.assign(AttributeType::Point3d, Value::Point3d(value));
    }

    pub fn set_polyline(&mut self, points: Vec<Point2d>) {
        self.assign(AttributeType::Polyline, Value::Polyline(points));
    }

    pub fn set_polyline3d(&mut self, points: Vec<Point3d>) {
        self.assign(AttributeType::Polyline3d, Value::Polyline3d(points));
    }

    /// Appends to an assigned POLYLINE, or starts a new one.
    pub fn add_to_polyline(&mut self, points: &[Point2d]) {
        let mut current = match &self.value {
            Some(Value::Polyline(existing)) if self.kind == AttributeType::Polyline => {
                existing.clone()
            }
            _ => Vec::new(),
        };
        current.extend_from_slice(points);
        self.set_polyline(current);
    }

    /// Appends to an assigned POLYLINE3D, or starts a new one.
    pub fn add_to_polyline3d(&mut self, points: &[Point3d]) {
        let mut current = match &self.value {
            Some(Value::Polyline3d(existing)) if self.kind == AttributeType::Polyline3d => {
                existing.clone()
            }
            _ => Vec::new(),
        };
        current.extend_from_slice(points);
        self.set_polyline3d(current);
    }

    pub fn set_image(&mut self, image: Image) {
        self.assign(AttributeType::Image, Value::Image(image));
    }

    /// Stores any payload, null included, under the OBJECT tag.
    pub fn set_object(&mut self, value: Value) {
        self.assign(AttributeType::Object, value);
    }

    pub fn set_uuid(&mut self, value: Uuid) {
        self.assign(AttributeType::Uuid, Value::Uuid(value));
    }

    pub fn set_uri(&mut self, value: Url) {
        self.assign(AttributeType::Uri, Value::Uri(value));
    }

    pub fn set_url(&mut self, value: Url) {
        self.assign(AttributeType::Url, Value::Url(value));
    }

    pub fn set_inet_address(&mut self, value: IpAddr) {
        self.assign(AttributeType::InetAddress, Value::InetAddress(value));
    }

    pub fn set_type_ref(&mut self, value: TypeRef) {
        self.assign(AttributeType::TypeRef, Value::TypeRef(value));
    }

    pub fn set_enum_ref(&mut self, value: EnumRef) {
        self.assign(AttributeType::EnumRef, Value::EnumRef(value));
    }

    /// Copies tag, state and payload from `other`.
    pub fn set_value(&mut self, other: &AttributeValue) {
        self.kind = other.kind;
        self.value = other.value.clone();
    }

    /// Back to unassigned. The tag is kept.
    pub fn uninitialize(&mut self) {
        self.value = None;
    }

    /// Assigns the tag's default, replacing any current payload.
    pub fn set_to_default(&mut self) {
        self.set_to_default_at(AttrContext::global().clock());
    }

    pub fn set_to_default_at(&mut self, clock: &dyn Clock) {
        self.value = Some(self.kind.default_value_at(clock));
    }

    pub fn set_to_default_if_uninitialized(&mut self) {
        if !self.is_assigned() {
            self.set_to_default();
        }
    }
}

fn address_url(addr: IpAddr) -> Option<Url> {
    let host = match addr {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => format!("[{}]", v6),
    };
    Url::parse(&format!("{}://{}/", DEFAULT_SCHEME, host)).ok()
}

macro_rules! from_payload {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value.into())
                }
            }

            impl From<$source> for AttributeValue {
                fn from(value: $source) -> Self {
                    AttributeValue::from_value(Value::from(value))
                }
            }
        )*
    };
}

from_payload! {
    bool => Boolean,
    i64 => Integer,
    i32 => Integer,
    u32 => Integer,
    f64 => Real,
    f32 => Real,
    String => String,
    &str => String,
    DateTime<Utc> => Date,
    Color => Color,
    Point2d => Point,
    Point3d => Point3d,
    Vec<Point2d> => Polyline,
    Vec<Point3d> => Polyline3d,
    Image => Image,
    Opaque => Object,
    Url => Url,
    Uuid => Uuid,
    IpAddr => InetAddress,
    TypeRef => TypeRef,
    EnumRef => EnumRef,
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        AttributeValue::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::net::Ipv4Addr;

    fn not_init(result: AttrResult<impl std::fmt::Debug>) -> bool {
        result.is_err_and(|e| e.is_not_initialized())
    }

    fn invalid(result: AttrResult<impl std::fmt::Debug>) -> bool {
        result.is_err_and(|e| e.is_invalid_type())
    }

    #[test]
    fn test_assignable_from_follows_tags() {
        let real = AttributeValue::from(1.5);
        let point = AttributeValue::point(1.0, 2.0);
        let unset_color = AttributeValue::empty(AttributeType::Color);
        assert!(point.is_assignable_from(&unset_color));
        assert!(point.is_assignable_from(&real));
        assert!(!real.is_assignable_from(&point));
        assert!(AttributeValue::new().is_assignable_from(&point));
    }

    #[test]
    fn test_default_is_unassigned_object() {
        let attr = AttributeValue::new();
        assert_eq!(attr.kind(), AttributeType::Object);
        assert!(!attr.is_assigned());
        assert!(!attr.is_base_type());
        assert!(attr.is_object_value());
        assert!(not_init(attr.value()));
        assert_eq!(attr.get_object(), Ok(None));
    }

    #[test]
    fn test_unassigned_accessors_fail() {
        for kind in AttributeType::ALL {
            let attr = AttributeValue::empty(kind);
            assert!(not_init(attr.get_boolean()), "{kind}");
            assert!(not_init(attr.get_integer()), "{kind}");
            assert!(not_init(attr.get_real()), "{kind}");
            assert!(not_init(attr.get_string()), "{kind}");
            assert!(not_init(attr.get_date()), "{kind}");
            assert!(not_init(attr.get_timestamp()), "{kind}");
            assert!(not_init(attr.get_color()), "{kind}");
            assert!(not_init(attr.get_point()), "{kind}");
            assert!(not_init(attr.get_point3d()), "{kind}");
            assert!(not_init(attr.get_polyline()), "{kind}");
            assert!(not_init(attr.get_polyline3d()), "{kind}");
            assert!(not_init(attr.get_image()), "{kind}");
            assert!(not_init(attr.get_uuid()), "{kind}");
            assert!(not_init(attr.get_uri()), "{kind}");
            assert!(not_init(attr.get_url()), "{kind}");
            if kind.is_base_type() {
                assert!(invalid(attr.get_object()), "{kind}");
            } else {
                assert_eq!(attr.get_object(), Ok(None), "{kind}");
            }
        }
    }

    #[test]
    fn test_boolean_value() {
        let attr = AttributeValue::from(true);
        assert_eq!(attr.kind(), AttributeType::Boolean);
        assert!(attr.is_base_type());
        assert!(!attr.is_object_value());
        assert_eq!(attr.get_boolean(), Ok(true));
        assert_eq!(attr.get_integer(), Ok(1));
        assert_eq!(attr.get_real(), Ok(1.0));
        assert_eq!(attr.get_string().unwrap(), "true");
        assert!(invalid(attr.get_color()));
        assert!(invalid(attr.get_date()));
        assert!(invalid(attr.get_timestamp()));
        assert!(invalid(attr.get_point()));
        assert!(invalid(attr.get_polyline3d()));
        assert!(invalid(attr.get_image()));
        assert!(invalid(attr.get_object()));
    }

    #[test]
    fn test_integer_value() {
        let attr = AttributeValue::from(300i64);
        assert_eq!(attr.get_boolean(), Ok(true));
        assert_eq!(attr.get_real(), Ok(300.0));
        assert_eq!(attr.get_timestamp(), Ok(300));
        assert_eq!(attr.get_point(), Ok(Point2d::new(300.0, 0.0)));
        assert_eq!(attr.get_point3d(), Ok(Point3d::new(300.0, 0.0, 0.0)));
        assert_eq!(
            attr.get_date().unwrap().timestamp_millis(),
            300,
            "integers read as epoch milliseconds"
        );
        assert!(invalid(attr.get_polyline()));
        assert_eq!(AttributeValue::from(0i32).get_boolean(), Ok(false));
    }

    #[test]
    fn test_real_value_truncates() {
        let attr = AttributeValue::from(-134.9);
        assert_eq!(attr.get_integer(), Ok(-134));
        assert_eq!(attr.get_string().unwrap(), "-134.9");
        assert_eq!(attr.get_point(), Ok(Point2d::new(-134.9, 0.0)));
    }

    #[test]
    fn test_color_value() {
        let attr = AttributeValue::color(255, 10, 20, 255);
        assert_eq!(attr.get_string().unwrap(), "255;10;20;255");
        assert_eq!(attr.get_point(), Ok(Point2d::new(255.0, 10.0)));
        assert_eq!(attr.get_point3d(), Ok(Point3d::new(255.0, 10.0, 20.0)));
        assert_eq!(
            AttributeValue::from(Color::BLACK).get_integer(),
            Ok(-16777216)
        );
        assert!(invalid(attr.get_boolean()));
        assert!(invalid(attr.get_date()));
        assert!(invalid(attr.get_timestamp()));
        assert!(invalid(attr.get_polyline()));
        assert_eq!(
            attr.get_object(),
            Ok(Some(Value::Color(Color::rgb(255, 10, 20))))
        );
    }

    #[test]
    fn test_string_holding_a_color() {
        let attr = AttributeValue::from("255;0;0");
        assert_eq!(attr.kind(), AttributeType::String);
        assert_eq!(attr.get_color(), Ok(Color::rgb(255, 0, 0)));
        assert_eq!(attr.get_point(), Ok(Point2d::new(255.0, 0.0)));
        assert_eq!(attr.get_point3d(), Ok(Point3d::new(255.0, 0.0, 0.0)));
        assert_eq!(
            attr.get_polyline(),
            Ok(vec![Point2d::new(255.0, 0.0), Point2d::new(0.0, 0.0)])
        );
        assert_eq!(
            attr.get_polyline3d(),
            Ok(vec![Point3d::new(255.0, 0.0, 0.0)])
        );
        assert!(invalid(attr.get_boolean()));
        assert!(invalid(attr.get_integer()));
        assert!(invalid(attr.get_real()));
        assert!(invalid(attr.get_timestamp()));
        assert!(invalid(attr.get_date()));
        assert!(invalid(attr.get_image()));
        assert!(invalid(attr.get_object()));
    }

    #[test]
    fn test_string_holding_an_integer() {
        let attr = AttributeValue::from("4321");
        assert_eq!(attr.get_integer(), Ok(4321));
        assert_eq!(attr.get_real(), Ok(4321.0));
        assert_eq!(attr.get_timestamp(), Ok(4321));
        assert_eq!(attr.get_point(), Ok(Point2d::new(4321.0, 0.0)));
        assert_eq!(attr.get_polyline(), Ok(vec![Point2d::new(4321.0, 0.0)]));
        assert!(invalid(attr.get_color()));
        assert!(invalid(attr.get_date()));
        assert!(invalid(attr.get_boolean()));
    }

    #[test]
    fn test_string_holding_a_date() {
        let attr = AttributeValue::from("2012-11-30");
        assert_eq!(
            attr.get_date().unwrap(),
            Utc.with_ymd_and_hms(2012, 11, 30, 0, 0, 0).unwrap()
        );
        assert!(invalid(attr.get_timestamp()));
        assert!(invalid(attr.get_integer()));
        assert!(invalid(attr.get_point()));
        assert!(invalid(attr.get_polyline()));
        assert!(invalid(attr.get_color()));
    }

    #[test]
    fn test_string_holding_a_boolean() {
        let attr = AttributeValue::from("true");
        assert_eq!(attr.get_boolean(), Ok(true));
        assert!(invalid(attr.get_point()));
        assert!(invalid(attr.get_real()));
        assert!(invalid(attr.get_polyline3d()));
    }

    #[test]
    fn test_polyline_values() {
        let line = vec![Point2d::new(1.0, 2.0), Point2d::new(3.0, 4.0)];
        let attr = AttributeValue::from(line.clone());
        assert_eq!(attr.kind(), AttributeType::Polyline);
        assert_eq!(attr.get_polyline(), Ok(line));
        assert_eq!(attr.get_string().unwrap(), "1.0;2.0;3.0;4.0");
        assert_eq!(
            attr.get_polyline3d().unwrap()[1],
            Point3d::new(3.0, 4.0, 0.0)
        );
        assert!(invalid(attr.get_point()));
        assert!(invalid(attr.get_integer()));
        assert_eq!(AttributeValue::from(Vec::<Point3d>::new()).get_string().unwrap(), "");
    }

    #[test]
    fn test_add_to_polyline() {
        let mut attr = AttributeValue::from(42i64);
        attr.add_to_polyline(&[Point2d::new(1.0, 1.0)]);
        attr.add_to_polyline(&[Point2d::new(2.0, 2.0)]);
        assert_eq!(attr.kind(), AttributeType::Polyline);
        assert_eq!(attr.get_polyline().unwrap().len(), 2);

        attr.add_to_polyline3d(&[Point3d::ORIGIN]);
        assert_eq!(attr.get_polyline3d(), Ok(vec![Point3d::ORIGIN]));
    }

    #[test]
    fn test_null_payloads() {
        let mut attr = AttributeValue::with_default(AttributeType::Image);
        assert!(attr.is_assigned());
        assert_eq!(attr.value(), Ok(&Value::Null));
        assert!(not_init(attr.get_image()));
        assert!(not_init(attr.get_string()));
        assert_eq!(attr.get_object(), Ok(None));

        attr.set_object(Value::Null);
        assert_eq!(attr.kind(), AttributeType::Object);
        assert!(attr.is_assigned());
        assert_eq!(attr.get_object(), Ok(None));
    }

    #[test]
    fn test_object_holding_a_payload() {
        let mut attr = AttributeValue::new();
        attr.set_object(Value::Point(Point2d::new(1.0, 2.0)));
        assert_eq!(attr.get_point(), Ok(Point2d::new(1.0, 2.0)));
        assert_eq!(attr.get_string().unwrap(), "1.0;2.0");

        let opaque = AttributeValue::object(Opaque::new("demo::Widget", "widget#4"));
        assert_eq!(opaque.get_string().unwrap(), "widget#4");
        assert!(invalid(opaque.get_integer()));
    }

    #[test]
    fn test_uri_and_url() {
        let id = Uuid::parse_str("3eade434-b267-4ffa-a574-2e2cbff0151a").unwrap();
        let attr = AttributeValue::from(id);
        let uri = attr.get_uri().unwrap();
        assert_eq!(uri.as_str(), "uuid:3eade434-b267-4ffa-a574-2e2cbff0151a");
        assert_eq!(AttributeValue::uri(uri).get_uuid(), Ok(id));
        assert!(invalid(attr.get_url()));

        let isbn = AttributeValue::uri(Url::parse("urn:isbn:096139210x").unwrap());
        assert!(invalid(isbn.get_url()));
        assert_eq!(isbn.get_uri().unwrap().scheme(), "urn");

        let text = AttributeValue::from("http://www.multiagent.fr");
        assert_eq!(text.get_url().unwrap().host_str(), Some("www.multiagent.fr"));
    }

    #[test]
    fn test_inet_address() {
        let attr = AttributeValue::with_default(AttributeType::InetAddress);
        assert_eq!(
            attr.get_inet_address(),
            Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        assert_eq!(attr.get_uri().unwrap().as_str(), "file://127.0.0.1/");
        assert_eq!(
            AttributeValue::from("localhost").get_inet_address(),
            Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        let url = AttributeValue::url(Url::parse("http://10.1.2.3:8080/x").unwrap());
        assert_eq!(
            url.get_inet_address(),
            Ok(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)))
        );
    }

    #[test]
    fn test_references() {
        let name = std::any::type_name::<Color>();
        let attr = AttributeValue::from(name);
        assert_eq!(attr.get_type_ref(), Ok(TypeRef::new(name)));

        let constant = format!("{}.POINT", std::any::type_name::<AttributeType>());
        let attr = AttributeValue::from(constant.as_str());
        let e = attr.get_enum_ref().unwrap();
        assert_eq!(e.ordinal, AttributeType::Point as usize);

        let as_enum = AttributeValue::from(e);
        assert_eq!(as_enum.get_integer(), Ok(AttributeType::Point as i64));
        assert_eq!(
            as_enum.get_type_ref().unwrap().name,
            std::any::type_name::<AttributeType>()
        );
        assert!(invalid(AttributeValue::from("nope").get_type_ref()));
    }

    #[test]
    fn test_set_to_default() {
        let clock = FixedClock::at_millis(5_000);
        let mut attr = AttributeValue::empty(AttributeType::Timestamp);
        attr.set_to_default_at(&clock);
        assert_eq!(attr.get_timestamp(), Ok(5_000));

        let mut date = AttributeValue::empty(AttributeType::Date);
        date.set_to_default();
        let now = Utc::now().timestamp_millis();
        assert!(date.get_date().unwrap().timestamp_millis() <= now);

        let mut flag = AttributeValue::from(true);
        flag.set_to_default();
        assert_eq!(flag.get_boolean(), Ok(false));

        let mut kept = AttributeValue::from(7i64);
        kept.set_to_default_if_uninitialized();
        assert_eq!(kept.get_integer(), Ok(7));
    }

    #[test]
    fn test_uninitialize_keeps_kind() {
        let mut attr = AttributeValue::point(1.0, 2.0);
        attr.uninitialize();
        assert_eq!(attr.kind(), AttributeType::Point);
        assert!(!attr.is_assigned());
    }

    #[test]
    fn test_with_value_casts() {
        let attr = AttributeValue::with_value(AttributeType::String, 12i64);
        assert_eq!(attr.kind(), AttributeType::String);
        assert_eq!(attr.get_string().unwrap(), "12");

        let empty = AttributeValue::with_value(AttributeType::Point, Value::Null);
        assert_eq!(empty.kind(), AttributeType::Point);
        assert!(!empty.is_assigned());
    }

    #[test]
    fn test_setters_fix_the_kind() {
        let mut attr = AttributeValue::new();
        attr.set_real(2.5);
        assert_eq!(attr.kind(), AttributeType::Real);
        attr.set_string("x");
        assert_eq!(attr.kind(), AttributeType::String);
        attr.set_uuid(Uuid::nil());
        assert_eq!(attr.kind(), AttributeType::Uuid);

        let mut copy = AttributeValue::new();
        copy.set_value(&attr);
        assert_eq!(copy.kind(), AttributeType::Uuid);
        assert_eq!(copy.get_uuid(), Ok(Uuid::nil()));
    }
}
