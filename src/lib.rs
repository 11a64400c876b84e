//! A small tape-machine interpreter.
//!
//! This crate runs Brainfuck programs, extended with `#` line comments, on a
//! tape of 65,535 signed 16-bit cells.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; each run starts from a fresh tape.
//! - Circular pointer: moving left from cell 0 lands on the last cell and
//!   moving right from the last cell lands on cell 0.
//! - Cells wrap at the `i16` boundaries.
//! - Input `,` reads one UTF-8 character and stores its code point; an
//!   exhausted input is an error.
//! - Output `.` writes the character whose code point is the cell value.
//! - `#` skips the rest of the line. Any other unknown byte is a no-op.
//! - Loops `[]` are resolved by scanning the program at run time; a scan that
//!   runs off either end of the program is reported as an error.
//!
//! Quick start:
//!
//! ```
//! use brainfucked::TapeMachine;
//!
//! // Prints "Hi"
//! let code = "++++++++[>+++++++++<-]>.  # 72 = 'H'\n+++++++++++++++++++++++++++++++++.";
//! let mut bf = TapeMachine::new(code).expect("program is not empty");
//! let mut output = String::new();
//! bf.run(&mut "".chars(), &mut output).expect("program should run");
//! assert_eq!(output, "Hi");
//! ```

mod error;
mod instruction;
pub mod io;
mod machine;
pub mod trace;

pub use error::{MachineError, UnmatchedBracketKind};
pub use instruction::Instruction;
pub use io::{CharSink, CharSource, Utf8Input, Utf8Output};
pub use machine::{TAPE_LEN, TapeMachine};
pub use trace::{Effect, TraceStep};
