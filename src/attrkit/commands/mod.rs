use crate::attr::{AttributeType, AttributeValue, ParseRule};
use crate::config::AttrKitConfig;
use serde::Serialize;
use std::cmp::Ordering;

pub mod cast;
pub mod compare;
pub mod config;
pub mod parse;
pub mod sort;
pub mod types;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One input and the value it produced.
#[derive(Debug, Clone, Serialize)]
pub struct ValueRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub input: String,
    pub value: AttributeValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<ParseRule>,
}

impl ValueRow {
    pub fn new(input: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: None,
            input: input.into(),
            value,
            rule: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rule(mut self, rule: ParseRule) -> Self {
        self.rule = Some(rule);
        self
    }
}

/// Result of comparing two values.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left: ValueRow,
    pub right: ValueRow,
    pub symbol: &'static str,
}

impl Comparison {
    pub fn new(left: ValueRow, right: ValueRow, ordering: Ordering) -> Self {
        let symbol = match ordering {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        Self {
            left,
            right,
            symbol,
        }
    }
}

/// A tag as listed by the `types` command.
#[derive(Debug, Clone, Serialize)]
pub struct TypeRow {
    pub kind: AttributeType,
    pub label: &'static str,
    pub default: Option<String>,
    pub base: bool,
    pub number: bool,
    pub nullable: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<AttrKitConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_values(mut self, values: Vec<ValueRow>) -> Self {
        self.values = values;
        self
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn with_types(mut self, types: Vec<TypeRow>) -> Self {
        self.types = types;
        self
    }

    pub fn with_config(mut self, config: AttrKitConfig) -> Self {
        self.config = Some(config);
        self
    }
}
