use super::frame::Frame;
use super::table::Table;
use super::window;
use crate::debugger::{base_name, AsmInstruction};
use crate::ui::console::print::style::Style;
use itertools::Itertools;

const COLUMN_GAP: usize = 2;

pub fn draw(frame: &mut Frame, instructions: &[AsmInstruction], height: usize) {
    frame.header("Assembly");

    let pc_idx = instructions
        .iter()
        .position(|inst| inst.at_pc)
        .unwrap_or_default();
    let visible = window(pc_idx, height, instructions.len());

    let mut table = Table::new(COLUMN_GAP);
    for inst in &instructions[visible] {
        let text_style = if inst.at_pc {
            Style::Current
        } else {
            Style::Text
        };
        let (mnemonic, operands) = inst.mnemonic_and_operands();
        let bytes = inst.bytes.iter().map(|b| format!("{b:02x}")).join(" ");

        table.row(vec![
            (
                Style::for_position(inst.at_pc, inst.breakpoint, Style::Gutter),
                format!("{:#x}", inst.address),
            ),
            (Style::Gutter, bytes),
            (text_style, mnemonic.to_string()),
            (text_style, operands.to_string()),
            (text_style, format!("{}:{}", base_name(&inst.file), inst.line)),
        ]);
    }
    table.render(frame);
}
