use crate::attr::{parse_with, AttributeType};
use crate::commands::{CmdMessage, CmdResult, ValueRow};
use crate::context::AttrContext;
use crate::error::Result;

pub fn run(ctx: &AttrContext, input: &str, target: AttributeType) -> Result<CmdResult> {
    let source = parse_with(input, ctx);
    let mut value = source.clone();
    let carried = value.cast_with(target, ctx);

    let mut result = CmdResult::default().with_values(vec![ValueRow::new(input, value)]);
    if !carried {
        result.add_message(CmdMessage::warning(format!(
            "{} value cannot be read as {}; using the default",
            source.kind(),
            target
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn casts_parsed_input() {
        let ctx = AttrContext::new();
        let result = run(&ctx, "1;2;3", AttributeType::Point3d).unwrap();
        let value = &result.values[0].value;
        assert_eq!(value.kind(), AttributeType::Point3d);
        assert_eq!(value.to_string(), "1.0;2.0;3.0");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn warns_on_fallback() {
        let ctx = AttrContext::new().with_clock(FixedClock::at_millis(0));
        let result = run(&ctx, "blablabla", AttributeType::Timestamp).unwrap();
        assert_eq!(result.values[0].value.get_timestamp(), Ok(0));
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("STRING"));
    }
}
