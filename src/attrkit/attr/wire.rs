use super::format::render;
use super::kind::AttributeType;
use super::parse::parse_with;
use super::value::AttributeValue;
use crate::context::AttrContext;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// ValueWire
/// Serde shape of an attribute value: its tag and canonical text.
///

#[derive(Serialize, Deserialize)]
struct ValueWire {
    #[serde(rename = "type")]
    kind: AttributeType,
    value: Option<String>,
}

impl AttributeValue {
    /// Rebuilds a value of `kind` from its canonical text.
    ///
    /// The text is first read through the `kind` accessor. If that fails, it is
    /// parsed and the parsed value is cast to `kind`, so a rendered TIMESTAMP
    /// (`yyyy-MM-dd HH:mm:ss`) comes back as the same instant.
    ///
    /// IMAGE and OBJECT payloads are not rebuilt from their text. An IMAGE comes
    /// back assigned with a null payload. An OBJECT comes back null too, unless
    /// its text parses as a structured value, which it then holds.
    pub fn decode(kind: AttributeType, text: &str, ctx: &AttrContext) -> AttributeValue {
        let mut value = AttributeValue::from(text);
        if value.cast_with(kind, ctx) {
            return value;
        }
        let mut parsed = parse_with(text, ctx);
        parsed.cast_with(kind, ctx);
        parsed
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ValueWire {
            kind: self.kind,
            value: self.value.as_ref().and_then(render),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = ValueWire::deserialize(deserializer)?;
        Ok(match wire.value {
            Some(text) => AttributeValue::decode(wire.kind, &text, AttrContext::global()),
            None => AttributeValue::empty(wire.kind),
        })
    }
}
