//! Payload types carried by attribute values.
//!
//! These are deliberately thin: geometry is a bag of coordinates, a color is four
//! channels, and an image is an identity handle. Arithmetic on them is not the
//! concern of this crate.

use crate::attr::format::format_real;
use std::fmt;
use uuid::Uuid;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Opaque black, the COLOR default.
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Packs the channels as `0xAARRGGBB`, reinterpreted as a signed 32-bit value.
    ///
    /// Opaque black packs to `-16777216`.
    pub fn to_argb(&self) -> i32 {
        let packed = (u32::from(self.alpha) << 24)
            | (u32::from(self.red) << 16)
            | (u32::from(self.green) << 8)
            | u32::from(self.blue);
        packed as i32
    }

    /// Unpacks the low 24 bits as RGB. The high byte is ignored and the result is opaque.
    pub fn from_rgb_bits(bits: i64) -> Self {
        let bits = bits as u32;
        Self::rgb(
            ((bits >> 16) & 0xff) as u8,
            ((bits >> 8) & 0xff) as u8,
            (bits & 0xff) as u8,
        )
    }

    /// Rounds and clamps a coordinate into a channel.
    pub fn channel(value: f64) -> u8 {
        if value.is_nan() {
            0
        } else {
            value.round().clamp(0.0, 255.0) as u8
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Point2d = Point2d { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lifts the point into 3D on the `z = 0` plane.
    pub fn extend(self) -> Point3d {
        Point3d::new(self.x, self.y, 0.0)
    }
}

impl fmt::Display for Point2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", format_real(self.x), format_real(self.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Point3d = Point3d {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drops the `z` axis.
    pub fn project(self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

impl fmt::Display for Point3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{}",
            format_real(self.x),
            format_real(self.y),
            format_real(self.z)
        )
    }
}

/// Handle to an image owned elsewhere. Only its identity and size are known here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    pub id: Uuid,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
        }
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image[{}x{}]@{}", self.width, self.height, self.id)
    }
}

/// A foreign object the type set has no dedicated tag for.
///
/// It is kept as the name of its type plus its textual form, which is all the
/// comparator and the STRING cast ever look at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opaque {
    pub type_name: String,
    pub repr: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            repr: repr.into(),
        }
    }

    /// Captures any displayable value under its Rust type name.
    pub fn of<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::new(std::any::type_name::<T>(), value.to_string())
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Reference to a type known to the [`TypeRegistry`](crate::registry::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reference to one constant of a registered enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumRef {
    pub type_name: String,
    pub constant: String,
    pub ordinal: usize,
}

impl EnumRef {
    pub fn new(type_name: impl Into<String>, constant: impl Into<String>, ordinal: usize) -> Self {
        Self {
            type_name: type_name.into(),
            constant: constant.into(),
            ordinal,
        }
    }
}

impl fmt::Display for EnumRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.constant)
    }
}
