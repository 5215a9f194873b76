use crate::attr::parse::infer;
use crate::attr::AttributeValue;
use crate::commands::{CmdResult, ValueRow};
use crate::context::AttrContext;
use crate::error::Result;

pub fn run<I: AsRef<str>>(ctx: &AttrContext, inputs: &[I]) -> Result<CmdResult> {
    let rows = inputs
        .iter()
        .map(|input| {
            let input = input.as_ref();
            let (rule, value) = infer(input, ctx);
            ValueRow::new(input, AttributeValue::from_value(value)).with_rule(rule)
        })
        .collect();
    Ok(CmdResult::default().with_values(rows))
}
