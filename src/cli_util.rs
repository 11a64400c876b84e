use std::io::{self, Write};

use brainfucked::MachineError;
use nu_ansi_term::Color;

use crate::config::Settings;

/// Print a machine error to stderr, prefixed with `program`, followed by a
/// context window and a caret under the failing instruction when the error
/// has a position.
pub fn print_machine_error(program: &str, code: &[u8], err: &MachineError, settings: &Settings) {
    let label = if settings.color.enabled() {
        Color::Red.bold().paint("error").to_string()
    } else {
        "error".to_string()
    };

    match err.ip() {
        Some(ip) => {
            eprintln!("{program}: {label}: {err}");
            let (slice, underline) = context_lines(code, ip, settings.context_window);
            eprintln!("  {slice}");
            eprintln!("  {underline}");
        }
        None => eprintln!("{program}: {label}: {err}"),
    }
    let _ = io::stderr().flush();
}

/// Render the program around byte `pos` and a caret line pointing at it.
///
/// Bytes are decoded lossily and whitespace control bytes are shown as
/// spaces so the caret stays aligned on a single line.
pub fn context_lines(code: &[u8], pos: usize, window: usize) -> (String, String) {
    let start = pos.saturating_sub(window);
    let end = pos.saturating_add(window).saturating_add(1).min(code.len());
    let start = start.min(end);

    let render = |bytes: &[u8]| -> String {
        String::from_utf8_lossy(bytes)
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    };

    let slice = render(&code[start..end]);
    let caret_offset = render(&code[start..pos.clamp(start, end)]).chars().count();
    let underline = format!("{}^", " ".repeat(caret_offset));

    (slice, underline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_failing_byte() {
        let (slice, underline) = context_lines(b"++[>+", 2, 32);
        assert_eq!(slice, "++[>+");
        assert_eq!(underline, "  ^");
    }

    #[test]
    fn window_trims_long_programs() {
        let code = format!("{}]{}", "+".repeat(50), "-".repeat(50));
        let (slice, underline) = context_lines(code.as_bytes(), 50, 4);
        assert_eq!(slice, "++++]----");
        assert_eq!(underline, "    ^");
    }

    #[test]
    fn newlines_do_not_break_the_context_line() {
        let (slice, underline) = context_lines(b"#x\n]", 3, 32);
        assert_eq!(slice, "#x ]");
        assert_eq!(underline, "   ^");
    }

    #[test]
    fn multibyte_text_keeps_caret_aligned() {
        let code = "é]".as_bytes();
        let (slice, underline) = context_lines(code, 2, 32);
        assert_eq!(slice, "é]");
        assert_eq!(underline, " ^");
    }
}
