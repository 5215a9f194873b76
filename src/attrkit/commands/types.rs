use crate::attr::format::render;
use crate::attr::AttributeType;
use crate::commands::{CmdResult, TypeRow};
use crate::context::AttrContext;
use crate::error::Result;

pub fn run(ctx: &AttrContext) -> Result<CmdResult> {
    let rows = AttributeType::ALL
        .iter()
        .map(|&kind| TypeRow {
            kind,
            label: kind.label(),
            default: render(&kind.default_value_at(ctx.clock())),
            base: kind.is_base_type(),
            number: kind.is_number_type(),
            nullable: kind.is_null_allowed(),
        })
        .collect();
    Ok(CmdResult::default().with_types(rows))
}
