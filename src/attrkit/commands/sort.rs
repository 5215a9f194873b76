use crate::attr::{compare, compare_named, parse_with, Attribute};
use crate::commands::{CmdResult, ValueRow};
use crate::context::AttrContext;
use crate::error::Result;

/// Sorts inputs by value, or by `name=value` pairs when `named` is set.
pub fn run<I: AsRef<str>>(ctx: &AttrContext, inputs: &[I], named: bool) -> Result<CmdResult> {
    let rows = if named {
        let mut attributes: Vec<(Attribute, &str)> = inputs
            .iter()
            .map(|input| (Attribute::parse_pair(input.as_ref(), ctx), input.as_ref()))
            .collect();
        attributes.sort_by(|(a, _), (b, _)| compare_named(a, b));
        attributes
            .into_iter()
            .map(|(attribute, input)| {
                let (name, value) = attribute.into_parts();
                ValueRow::new(input, value).with_name(name)
            })
            .collect()
    } else {
        let mut values: Vec<ValueRow> = inputs
            .iter()
            .map(|input| ValueRow::new(input.as_ref(), parse_with(input.as_ref(), ctx)))
            .collect();
        values.sort_by(|a, b| compare(&a.value, &b.value));
        values
    };
    Ok(CmdResult::default().with_values(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(result: &CmdResult) -> Vec<&str> {
        result.values.iter().map(|r| r.input.as_str()).collect()
    }

    #[test]
    fn sorts_mixed_values() {
        let ctx = AttrContext::new();
        let result = run(&ctx, &["pear", "10", "apple", "-1.5", "2"], false).unwrap();
        assert_eq!(inputs(&result), vec!["-1.5", "2", "10", "apple", "pear"]);
    }

    #[test]
    fn sort_is_stable_for_equal_values() {
        let ctx = AttrContext::new();
        let result = run(&ctx, &["2.0", "true", "2", "TRUE"], false).unwrap();
        assert_eq!(inputs(&result), vec!["2.0", "2", "true", "TRUE"]);
    }

    #[test]
    fn sorts_named_pairs() {
        let ctx = AttrContext::new();
        let result = run(&ctx, &["width=10", "height=3", "width=2"], true).unwrap();
        assert_eq!(inputs(&result), vec!["height=3", "width=2", "width=10"]);
        assert_eq!(result.values[0].name.as_deref(), Some("height"));
    }
}
