//! Character-level input and output for the machine.
//!
//! `,` pulls one character from a [`CharSource`] and `.` pushes one character
//! into a [`CharSink`]. The UTF-8 adapters wrap any byte stream (stdin,
//! stdout, files); `&str` iterators and `String` are handy in-memory
//! implementations.

use std::io::{self, Read, Write};
use std::str::Chars;

/// Supplies characters on demand.
pub trait CharSource {
    /// Read the next character, or `Ok(None)` once the source is exhausted.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Accepts characters one at a time.
pub trait CharSink {
    fn put_char(&mut self, ch: char) -> io::Result<()>;

    /// Push buffered characters to their destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CharSource for Chars<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

impl CharSink for String {
    fn put_char(&mut self, ch: char) -> io::Result<()> {
        self.push(ch);
        Ok(())
    }
}

/// Decodes UTF-8 characters from a byte stream, one at a time.
///
/// Reads exactly as many bytes as the character needs, so nothing past the
/// character is consumed from the underlying reader.
pub struct Utf8Input<R> {
    reader: R,
}

impl<R: Read> Utf8Input<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> CharSource for Utf8Input<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 4];
        loop {
            match self.reader.read(&mut buf[..1]) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        let width = utf8_width(buf[0]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid UTF-8 leading byte 0x{:02x}", buf[0]),
            )
        })?;
        // A truncated sequence surfaces as UnexpectedEof
        self.reader.read_exact(&mut buf[1..width])?;

        let decoded = std::str::from_utf8(&buf[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(decoded.chars().next())
    }
}

/// Encoded length of a UTF-8 sequence, judged from its first byte.
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Encodes characters as UTF-8 into a byte stream.
pub struct Utf8Output<W> {
    writer: W,
}

impl<W: Write> Utf8Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CharSink for Utf8Output<W> {
    fn put_char(&mut self, ch: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.writer.write_all(ch.encode_utf8(&mut buf).as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
