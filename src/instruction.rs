use std::fmt;

/// One decoded program byte.
///
/// Every byte decodes to exactly one variant; bytes outside the instruction
/// set become [`Instruction::Noop`] and keep the original byte for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `<`
    MoveLeft,
    /// `>`
    MoveRight,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// `#`, runs to the end of the line
    Comment,
    Noop(u8),
}

impl Instruction {
    pub const fn decode(byte: u8) -> Self {
        match byte {
            b'+' => Instruction::Increment,
            b'-' => Instruction::Decrement,
            b'<' => Instruction::MoveLeft,
            b'>' => Instruction::MoveRight,
            b'.' => Instruction::Output,
            b',' => Instruction::Input,
            b'[' => Instruction::LoopStart,
            b']' => Instruction::LoopEnd,
            b'#' => Instruction::Comment,
            other => Instruction::Noop(other),
        }
    }

    /// The byte this instruction was decoded from.
    pub const fn byte(self) -> u8 {
        match self {
            Instruction::Increment => b'+',
            Instruction::Decrement => b'-',
            Instruction::MoveLeft => b'<',
            Instruction::MoveRight => b'>',
            Instruction::Output => b'.',
            Instruction::Input => b',',
            Instruction::LoopStart => b'[',
            Instruction::LoopEnd => b']',
            Instruction::Comment => b'#',
            Instruction::Noop(byte) => byte,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Escape so newlines and control bytes keep trace rows on one line
        write!(f, "{}", self.byte().escape_ascii())
    }
}
