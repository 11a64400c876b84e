//! Per-step execution records, and the table the CLI prints with `--debug`.

use std::fmt;

use crate::Instruction;

/// What one executed instruction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `+`/`-` changed the active cell.
    Cell { from: i16, to: i16 },
    /// `<`/`>` moved the pointer.
    Moved { to: usize },
    Wrote(char),
    Read(char),
    /// `[` on a zero cell skipped to the byte after its matching `]`.
    SkippedLoop { resume: usize },
    EnteredLoop,
    /// `]` jumped back to its matching `[`.
    JumpedBack { to: usize },
    /// `#` skipped to the end of the line.
    Comment { resume: usize },
    Noop,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Effect::Cell { from, to } => write!(f, "Set cell from {from} to {to}"),
            Effect::Moved { to } => write!(f, "Moved pointer head to index {to}"),
            Effect::Wrote(ch) => write!(f, "Output char {:?}", ch),
            Effect::Read(ch) => write!(f, "Read char {:?} -> {}", ch, ch as u32 as i16),
            Effect::SkippedLoop { resume } => {
                write!(f, "Cell is 0; skip loop, resume at IP {resume}")
            }
            Effect::EnteredLoop => write!(f, "Enter loop (cell != 0)"),
            Effect::JumpedBack { to } => write!(f, "Jump back to matching '[' at IP {to}"),
            Effect::Comment { resume } => write!(f, "Comment; resume at IP {resume}"),
            Effect::Noop => write!(f, "No-op"),
        }
    }
}

/// One executed instruction, as seen by a trace observer.
///
/// `pointer` and `cell` are sampled before the instruction ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    pub step: usize,
    pub ip: usize,
    pub pointer: usize,
    pub cell: i16,
    pub instruction: Instruction,
    pub effect: Effect,
}

pub const TABLE_HEADER: &str = "STEP | IP    | PTR   | CELL   | INSTR | ACTION";
pub const TABLE_RULE: &str = "-----+-------+-------+--------+-------+------------------------------------------------";

impl TraceStep {
    /// Render this step as one row of the debug table.
    pub fn table_row(&self) -> String {
        format!(
            "{:<4} | {:<5} | {:<5} | {:<6} | {:<5} | {}",
            self.step,
            self.ip,
            self.pointer,
            self.cell,
            self.instruction.to_string(),
            self.effect
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lines_up_with_header() {
        let step = TraceStep {
            step: 0,
            ip: 0,
            pointer: 0,
            cell: 0,
            instruction: Instruction::MoveRight,
            effect: Effect::Moved { to: 1 },
        };
        let row = step.table_row();
        assert!(row.contains("Moved pointer head to index 1"));
        let header_bars: Vec<usize> = TABLE_HEADER.match_indices('|').map(|(i, _)| i).collect();
        let row_bars: Vec<usize> = row.match_indices('|').map(|(i, _)| i).collect();
        assert_eq!(header_bars, row_bars);
    }

    #[test]
    fn read_effect_shows_stored_value() {
        assert_eq!(Effect::Read('A').to_string(), "Read char 'A' -> 65");
    }
}
