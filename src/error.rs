use std::fmt;
use std::io;

/// Errors that can occur while constructing or running a [`crate::TapeMachine`].
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// The machine was given a zero-length program.
    #[error("Empty program: nothing to execute")]
    EmptyProgram,

    /// The input source could not supply a character for `,`.
    ///
    /// Exhaustion is reported with [`io::ErrorKind::UnexpectedEof`].
    #[error("I/O error at instruction {ip}: failed to read input: {source}")]
    Input { ip: usize, #[source] source: io::Error },

    /// The output sink rejected a character written by `.`.
    #[error("I/O error at instruction {ip}: failed to write output: {source}")]
    Output { ip: usize, #[source] source: io::Error },

    /// A bracket scan ran off the end of the program.
    #[error("Malformed program: unmatched bracket {kind} at instruction {ip}")]
    MalformedProgram { ip: usize, kind: UnmatchedBracketKind },
}

impl MachineError {
    /// Index of the instruction that failed, if the error has one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            MachineError::EmptyProgram => None,
            MachineError::Input { ip, .. }
            | MachineError::Output { ip, .. }
            | MachineError::MalformedProgram { ip, .. } => Some(*ip),
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_is_reported_for_positional_errors() {
        let err = MachineError::MalformedProgram { ip: 7, kind: UnmatchedBracketKind::Close };
        assert_eq!(err.ip(), Some(7));
        assert_eq!(MachineError::EmptyProgram.ip(), None);
    }

    #[test]
    fn display_names_the_bracket() {
        let err = MachineError::MalformedProgram { ip: 0, kind: UnmatchedBracketKind::Open };
        assert_eq!(err.to_string(), "Malformed program: unmatched bracket '[' at instruction 0");
    }

    #[test]
    fn input_error_keeps_its_source() {
        use std::error::Error;

        let err = MachineError::Input {
            ip: 3,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "input exhausted"),
        };
        let source = err.source().expect("source attached");
        assert_eq!(source.to_string(), "input exhausted");
    }
}
