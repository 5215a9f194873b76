use attrkit::api::{CmdMessage, CmdResult, Comparison, MessageLevel, TypeRow, ValueRow};
use attrkit::config::{AttrKitConfig, CONFIG_KEYS};
use attrkit::error::Result;
use colored::Colorize;

const UNASSIGNED: &str = "<unassigned>";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_json(result: &CmdResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn value_text(row: &ValueRow) -> String {
    if row.value.is_assigned() {
        row.value.to_string()
    } else {
        UNASSIGNED.to_string()
    }
}

/// `TAG<TAB>text`, one line per value.
pub(super) fn print_values(rows: &[ValueRow]) {
    for row in rows {
        println!("{}\t{}", row.value.kind().name().cyan(), value_text(row));
    }
}

/// Inputs in the order they were sorted into.
pub(super) fn print_sorted(rows: &[ValueRow]) {
    for row in rows {
        println!("{}", row.input);
    }
}

pub(super) fn print_comparison(comparison: &Comparison) {
    println!("{}", comparison.symbol.bold());
}

pub(super) fn print_types(types: &[TypeRow]) {
    let width = types
        .iter()
        .map(|t| t.kind.name().len())
        .max()
        .unwrap_or(0);
    for row in types {
        let mut flags = Vec::new();
        if row.base {
            flags.push("base");
        }
        if row.number {
            flags.push("number");
        }
        if row.nullable {
            flags.push("nullable");
        }
        let default = row.default.as_deref().unwrap_or("null");
        let name = format!("{:<width$}", row.kind.name(), width = width);
        println!("{}  {:<24}  {}", name.cyan(), default, flags.join(",").dimmed());
    }
}

pub(super) fn print_config(config: &AttrKitConfig) {
    for key in CONFIG_KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}
