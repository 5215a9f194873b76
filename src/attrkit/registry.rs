//! Registry of known type names and enumerations.
//!
//! TYPE_REF and ENUM_REF values can only point at things this registry knows about.
//! The parser consults it before trying any literal grammar, so a registered name
//! such as `alloc::string::String` is read as a type reference and never as plain text.
//!
//! | Lookup              | Input                          | Yields    |
//! |---------------------|--------------------------------|-----------|
//! | [`TypeRegistry::type_ref`] | `uuid::Uuid`            | `TypeRef` |
//! | [`TypeRegistry::enum_ref`] | `<enum type>.<CONSTANT>` | `EnumRef` |

use crate::attr::AttributeType;
use crate::primitives::{Color, EnumRef, Image, Point2d, Point3d, TypeRef};
use std::collections::{BTreeMap, BTreeSet};

/// Type names that are always known, written the way users spell them.
const BUILTIN_TYPE_NAMES: &[&str] = &[
    "std::string::String",
    "std::net::IpAddr",
    "std::net::Ipv4Addr",
    "std::net::Ipv6Addr",
    "uuid::Uuid",
    "url::Url",
    "chrono::DateTime<chrono::Utc>",
];

/// An enumeration whose constants can be referenced by name.
pub trait EnumConstants {
    fn enum_type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Constant names in ordinal order.
    fn constant_names() -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeSet<String>,
    enums: BTreeMap<String, Vec<String>>,
}

impl TypeRegistry {
    /// An empty registry. Nothing parses as TYPE_REF or ENUM_REF against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard registry: common std and dependency types, the payload types
    /// of this crate, and [`AttributeType`] as an enumeration.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_TYPE_NAMES {
            registry.register_type_name(*name);
        }
        registry.register_type::<String>();
        registry.register_type::<std::net::IpAddr>();
        registry.register_type::<uuid::Uuid>();
        registry.register_type::<url::Url>();
        registry.register_type::<Color>();
        registry.register_type::<Point2d>();
        registry.register_type::<Point3d>();
        registry.register_type::<Image>();
        registry.register_type::<crate::attr::AttributeValue>();
        registry.register_enum_type::<AttributeType>();
        registry
    }

    pub fn register_type_name(&mut self, name: impl Into<String>) {
        self.types.insert(name.into());
    }

    pub fn register_type<T: ?Sized>(&mut self) {
        self.register_type_name(std::any::type_name::<T>());
    }

    /// Registers an enumeration. Its type name also becomes a known type.
    pub fn register_enum<I, S>(&mut self, type_name: impl Into<String>, constants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let type_name = type_name.into();
        self.types.insert(type_name.clone());
        self.enums
            .insert(type_name, constants.into_iter().map(Into::into).collect());
    }

    pub fn register_enum_type<E: EnumConstants>(&mut self) {
        self.register_enum(E::enum_type_name(), E::constant_names());
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn type_ref(&self, name: &str) -> Option<TypeRef> {
        self.contains_type(name).then(|| TypeRef::new(name))
    }

    /// Resolves `<enum type>.<CONSTANT>`.
    ///
    /// An exact constant match wins; otherwise the constant is matched ignoring ASCII case.
    pub fn enum_ref(&self, text: &str) -> Option<EnumRef> {
        let (type_name, constant) = text.rsplit_once('.')?;
        self.enum_constant(type_name, constant)
    }

    pub fn enum_constant(&self, type_name: &str, constant: &str) -> Option<EnumRef> {
        let constants = self.enums.get(type_name)?;
        let ordinal = constants
            .iter()
            .position(|c| c == constant)
            .or_else(|| {
                constants
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(constant))
            })?;
        Some(EnumRef::new(type_name, constants[ordinal].clone(), ordinal))
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }
}
