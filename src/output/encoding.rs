//! Text encodings accepted for process output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolboxError;

/// Encoding used to turn output bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 (invalid sequences become U+FFFD).
    #[default]
    Utf8,
    /// UTF-16, little endian.
    Utf16Le,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
    /// 7-bit ASCII; the high bit of each byte is dropped.
    Ascii,
}

impl Encoding {
    /// Decode bytes, replacing anything that cannot be represented.
    pub fn decode(&self, input: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(input).into_owned(),
            Self::Utf16Le => {
                let units: Vec<u16> = input
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                let mut text = String::from_utf16_lossy(&units);
                if input.len() % 2 == 1 {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
            Self::Latin1 => input.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii => input.iter().map(|&b| char::from(b & 0x7f)).collect(),
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "latin1" | "binary" | "iso-8859-1" => Ok(Self::Latin1),
            "ascii" => Ok(Self::Ascii),
            _ => Err(ToolboxError::InvalidEncoding(s.to_string())),
        }
    }
}
