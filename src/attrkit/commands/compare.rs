use crate::attr::{compare, parse_with};
use crate::commands::{CmdResult, Comparison, ValueRow};
use crate::context::AttrContext;
use crate::error::Result;

pub fn run(ctx: &AttrContext, left: &str, right: &str) -> Result<CmdResult> {
    let left_value = parse_with(left, ctx);
    let right_value = parse_with(right, ctx);
    let ordering = compare(&left_value, &right_value);
    Ok(CmdResult::default().with_comparison(Comparison::new(
        ValueRow::new(left, left_value),
        ValueRow::new(right, right_value),
        ordering,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(left: &str, right: &str) -> &'static str {
        let result = run(&AttrContext::new(), left, right).unwrap();
        result.comparison.unwrap().symbol
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(symbol("2", "10"), "<");
        assert_eq!(symbol("2", "2.0"), "=");
        assert_eq!(symbol("1e3", "999"), ">");
    }

    #[test]
    fn numbers_before_text() {
        assert_eq!(symbol("999", "abc"), "<");
        assert_eq!(symbol("abc", "abd"), "<");
    }

    #[test]
    fn text_before_structured_values() {
        assert_eq!(symbol("zzz", "1;2"), "<");
        assert_eq!(symbol("0;0;0;255", "zzz"), ">");
        assert_eq!(symbol("1;2", "3;4"), "<");
    }
}
