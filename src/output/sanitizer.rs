//! Output sanitization: decoding, ANSI stripping and line splitting.

use vte::{Params, Parser, Perform};

use super::encoding::Encoding;
use super::sink::LineSink;

/// Turns raw process output into a list of clean lines.
///
/// Decoding never fails: invalid sequences are replaced. Lines are split on
/// `\r\n`, `\r` or `\n` and have trailing whitespace removed. A single line
/// terminator at the very end of the input does not produce an extra empty
/// line, but any further blank lines are kept as empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSanitizer {
    encoding: Encoding,
    strip_ansi: bool,
}

impl LineSanitizer {
    /// Create a UTF-8 sanitizer that keeps escape sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode input with the given encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Remove ANSI escape sequences before splitting.
    pub fn with_strip_ansi(mut self, strip: bool) -> Self {
        self.strip_ansi = strip;
        self
    }

    /// Encoding used for byte input.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Split raw bytes into lines.
    pub fn sanitize(&self, input: &[u8]) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        let text = self.encoding.decode(input);
        self.sanitize_str(&text)
    }

    /// Split already-decoded text into lines.
    pub fn sanitize_str(&self, input: &str) -> Vec<String> {
        if self.strip_ansi {
            split_lines(&strip_ansi_str(input))
        } else {
            split_lines(input)
        }
    }

    /// Split raw bytes into lines and forward each one to `sink`.
    pub fn sanitize_to(&self, input: &[u8], sink: &LineSink) -> Vec<String> {
        let lines = self.sanitize(input);
        for line in &lines {
            sink(line);
        }
        lines
    }
}

/// Split optional output into lines with the default sanitizer.
///
/// `None` yields an empty list.
pub fn sanitize<T: AsRef<[u8]>>(input: Option<T>) -> Vec<String> {
    match input {
        Some(data) => LineSanitizer::new().sanitize(data.as_ref()),
        None => Vec::new(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let text = text.trim_end_matches([' ', '\t']);
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);

    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    lines.push(current);

    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Strip ANSI escape codes from raw bytes.
///
/// Returns UTF-8 text with all control sequences removed.
pub fn strip_ansi(input: &[u8]) -> String {
    let mut extractor = PlainTextExtractor::new();
    let mut parser = Parser::new();

    parser.advance(&mut extractor, input);

    extractor.into_string()
}

/// Strip ANSI codes from a string.
pub fn strip_ansi_str(input: &str) -> String {
    strip_ansi(input.as_bytes())
}

/// VTE performer that keeps printable text and line structure.
struct PlainTextExtractor {
    output: Vec<u8>,
}

impl PlainTextExtractor {
    fn new() -> Self {
        Self { output: Vec::new() }
    }

    fn into_string(self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Perform for PlainTextExtractor {
    fn print(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let encoded = c.encode_utf8(&mut buf);
        self.output.extend_from_slice(encoded.as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        // newline, carriage return and tab carry line structure
        if matches!(byte, 0x0A | 0x0D | 0x09) {
            self.output.push(byte);
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(
        &mut self,
        _params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_crlf_lines() {
        let out = LineSanitizer::new().sanitize_str("test1\r\ntest2\r\ntest3\n");
        assert_eq!(out, vec!["test1", "test2", "test3"]);
    }

    #[test]
    fn test_bytes_input() {
        let out = LineSanitizer::new().sanitize(b"test1\r\ntest2\r\ntest3\n");
        assert_eq!(out, vec!["test1", "test2", "test3"]);
    }

    #[test]
    fn test_multiple_newlines() {
        let out = LineSanitizer::new().sanitize_str("test1\r\n\ntest2\n\n\n\r\ntest3\n\n\n");
        assert_eq!(out.len(), 9);
        assert_eq!(out[0], "test1");
        assert_eq!(out[1], "");
        assert_eq!(out[2], "test2");
        assert_eq!(out[6], "test3");
    }

    #[test]
    fn test_bare_carriage_return() {
        let out = LineSanitizer::new().sanitize_str("a\rb\r\nc");
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let out = LineSanitizer::new().sanitize_str("  first  \t\nsecond   \n   ");
        assert_eq!(out, vec!["  first", "second"]);
    }

    #[test]
    fn test_absent_input() {
        assert!(sanitize(None::<&[u8]>).is_empty());
        assert!(sanitize(Some("")).is_empty());
        assert!(sanitize(Some(" \t \n")).is_empty());
    }

    #[test]
    fn test_sanitize_free_fn() {
        assert_eq!(sanitize(Some("one\ntwo")), vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let out = LineSanitizer::new().sanitize(b"ok\n\xff\xfe bad\n");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "ok");
        assert!(out[1].ends_with("bad"));
    }

    #[test]
    fn test_latin1_encoding() {
        let out = LineSanitizer::new()
            .with_encoding(Encoding::Latin1)
            .sanitize(b"caf\xe9\n");
        assert_eq!(out, vec!["café"]);
    }

    #[test]
    fn test_strip_ansi_option() {
        let out = LineSanitizer::new()
            .with_strip_ansi(true)
            .sanitize(b"\x1b[31mred\x1b[0m\r\n\x1b[1mbold\x1b[0m\n");
        assert_eq!(out, vec!["red", "bold"]);
    }

    #[test]
    fn test_ansi_kept_by_default() {
        let out = LineSanitizer::new().sanitize(b"\x1b[31mred\x1b[0m");
        assert_eq!(out, vec!["\x1b[31mred\x1b[0m"]);
    }

    #[test]
    fn test_sanitize_to_forwards_lines() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink: LineSink = Arc::new(move |line: &str| {
            captured.lock().unwrap().push(line.to_string());
        });

        let lines = LineSanitizer::new().sanitize_to(b"a\nb\n", &sink);

        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_strip_ansi_osc_title() {
        let output = strip_ansi(b"\x1b]0;Window Title\x07actual content");
        assert_eq!(output, "actual content");
    }

    #[test]
    fn test_strip_ansi_preserves_tabs_and_newlines() {
        let output = strip_ansi_str("col1\tcol2\nrow2");
        assert_eq!(output, "col1\tcol2\nrow2");
    }
}
