use crate::io::{CharSink, CharSource};
use crate::trace::{Effect, TraceStep};
use crate::{Instruction, MachineError, UnmatchedBracketKind};

/// Number of cells on the tape.
pub const TAPE_LEN: usize = 65_535;

/// A tape machine bound to one program.
///
/// The machine maintains:
/// - the program bytes, never mutated after construction,
/// - a circular tape of [`TAPE_LEN`] signed 16-bit cells,
/// - a pointer selecting the active cell.
///
/// Moving left from cell 0 lands on the last cell and moving right from the
/// last cell lands on cell 0, so the pointer is always a valid index.
pub struct TapeMachine {
    program: Vec<u8>,
    cells: Box<[i16]>,
    pointer: usize,
}

impl TapeMachine {
    /// Create a machine for `program` with a zeroed tape.
    ///
    /// Fails with [`MachineError::EmptyProgram`] if `program` has no bytes.
    pub fn new(program: impl Into<Vec<u8>>) -> Result<Self, MachineError> {
        let program = program.into();
        if program.is_empty() {
            return Err(MachineError::EmptyProgram);
        }

        Ok(Self {
            program,
            cells: vec![0; TAPE_LEN].into_boxed_slice(),
            pointer: 0,
        })
    }

    /// The program bytes, exactly as given to [`TapeMachine::new`].
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// The whole tape, [`TAPE_LEN`] cells long.
    pub fn cells(&self) -> &[i16] {
        &self.cells
    }

    /// Index of the active cell.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Value of the active cell.
    pub fn current_cell(&self) -> i16 {
        self.cells[self.pointer]
    }

    /// Execute the program until completion.
    ///
    /// Every run starts from a zeroed tape with the pointer on cell 0. The
    /// final tape stays readable through [`TapeMachine::cells`] afterwards.
    pub fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<(), MachineError>
    where
        I: CharSource + ?Sized,
        O: CharSink + ?Sized,
    {
        self.execute(input, output, None)
    }

    /// Execute like [`TapeMachine::run`], reporting every executed
    /// instruction to `observer` after its effect is applied.
    pub fn run_traced<I, O, F>(
        &mut self,
        input: &mut I,
        output: &mut O,
        mut observer: F,
    ) -> Result<(), MachineError>
    where
        I: CharSource + ?Sized,
        O: CharSink + ?Sized,
        F: FnMut(&TraceStep),
    {
        self.execute(input, output, Some(&mut observer as &mut dyn FnMut(&TraceStep)))
    }

    fn execute<I, O>(
        &mut self,
        input: &mut I,
        output: &mut O,
        mut observer: Option<&mut dyn FnMut(&TraceStep)>,
    ) -> Result<(), MachineError>
    where
        I: CharSource + ?Sized,
        O: CharSink + ?Sized,
    {
        self.cells.fill(0);
        self.pointer = 0;

        tracing::debug!(program_len = self.program.len(), "starting run");

        let code_len = self.program.len();
        let mut ip = 0;
        let mut step = 0;

        while ip < code_len {
            let instruction = Instruction::decode(self.program[ip]);
            let (pointer_before, cell_before) = (self.pointer, self.current_cell());

            let (next_ip, effect) = match self.step(ip, instruction, input, output) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::debug!(error = %err, step, "run aborted");
                    return Err(err);
                }
            };

            if let Some(observer) = observer.as_mut() {
                observer(&TraceStep {
                    step,
                    ip,
                    pointer: pointer_before,
                    cell: cell_before,
                    instruction,
                    effect,
                });
            }

            step += 1;
            ip = next_ip;
        }

        tracing::debug!(steps = step, "run finished");
        Ok(())
    }

    /// Apply one instruction, returning where execution continues.
    fn step<I, O>(
        &mut self,
        ip: usize,
        instruction: Instruction,
        input: &mut I,
        output: &mut O,
    ) -> Result<(usize, Effect), MachineError>
    where
        I: CharSource + ?Sized,
        O: CharSink + ?Sized,
    {
        let outcome = match instruction {
            Instruction::Increment => {
                let from = self.cells[self.pointer];
                let to = from.wrapping_add(1);
                self.cells[self.pointer] = to;
                (ip + 1, Effect::Cell { from, to })
            }
            Instruction::Decrement => {
                let from = self.cells[self.pointer];
                let to = from.wrapping_sub(1);
                self.cells[self.pointer] = to;
                (ip + 1, Effect::Cell { from, to })
            }
            Instruction::MoveLeft => {
                self.pointer = self.pointer.checked_sub(1).unwrap_or(TAPE_LEN - 1);
                (ip + 1, Effect::Moved { to: self.pointer })
            }
            Instruction::MoveRight => {
                self.pointer = (self.pointer + 1) % TAPE_LEN;
                (ip + 1, Effect::Moved { to: self.pointer })
            }
            Instruction::Output => {
                let ch = cell_to_char(self.current_cell());
                output
                    .put_char(ch)
                    .map_err(|source| MachineError::Output { ip, source })?;
                (ip + 1, Effect::Wrote(ch))
            }
            Instruction::Input => {
                // Make pending output (e.g. a prompt) visible before blocking
                output
                    .flush()
                    .map_err(|source| MachineError::Output { ip, source })?;
                let ch = match input.next_char() {
                    Ok(Some(ch)) => ch,
                    Ok(None) => {
                        return Err(MachineError::Input {
                            ip,
                            source: std::io::Error::new(
                                std::io::ErrorKind::UnexpectedEof,
                                "input exhausted",
                            ),
                        });
                    }
                    Err(source) => return Err(MachineError::Input { ip, source }),
                };
                self.cells[self.pointer] = ch as u32 as i16;
                (ip + 1, Effect::Read(ch))
            }
            Instruction::LoopStart => {
                if self.current_cell() == 0 {
                    let close = find_matching_close(&self.program, ip)?;
                    (close + 1, Effect::SkippedLoop { resume: close + 1 })
                } else {
                    (ip + 1, Effect::EnteredLoop)
                }
            }
            Instruction::LoopEnd => {
                // Land on the '[' itself so its zero check runs again
                let open = find_matching_open(&self.program, ip)?;
                (open, Effect::JumpedBack { to: open })
            }
            Instruction::Comment => {
                let resume = skip_line(&self.program, ip);
                (resume, Effect::Comment { resume })
            }
            Instruction::Noop(_) => (ip + 1, Effect::Noop),
        };

        Ok(outcome)
    }
}

/// Character for a cell value; negative values have no code point.
fn cell_to_char(value: i16) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Scan forward from the `[` at `open` to its matching `]`.
///
/// Brackets are counted wherever they appear, comment text included.
fn find_matching_close(program: &[u8], open: usize) -> Result<usize, MachineError> {
    let mut depth = 1usize;
    for (idx, &byte) in program.iter().enumerate().skip(open + 1) {
        match Instruction::decode(byte) {
            Instruction::LoopStart => depth += 1,
            Instruction::LoopEnd => {
                depth -= 1;
                if depth == 0 {
                    return Ok(idx);
                }
            }
            _ => {}
        }
    }

    Err(MachineError::MalformedProgram {
        ip: open,
        kind: UnmatchedBracketKind::Open,
    })
}

/// Scan backward from the `]` at `close` to its matching `[`.
fn find_matching_open(program: &[u8], close: usize) -> Result<usize, MachineError> {
    let mut depth = 1usize;
    for (idx, &byte) in program[..close].iter().enumerate().rev() {
        match Instruction::decode(byte) {
            Instruction::LoopEnd => depth += 1,
            Instruction::LoopStart => {
                depth -= 1;
                if depth == 0 {
                    return Ok(idx);
                }
            }
            _ => {}
        }
    }

    Err(MachineError::MalformedProgram {
        ip: close,
        kind: UnmatchedBracketKind::Close,
    })
}

/// Position just past the newline ending the line that contains `from`, or
/// the program length when the line runs to the end.
fn skip_line(program: &[u8], from: usize) -> usize {
    program[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(program.len(), |offset| from + offset + 1)
}
