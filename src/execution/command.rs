//! Command input shapes and their normalization.

use std::fmt;

/// The command to run.
///
/// Every shape is normalized to one command line before it reaches the
/// shell. Token lists are joined with a single space and no quoting, so a
/// token containing whitespace or shell metacharacters is split or
/// interpreted by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// A complete command line.
    Text(String),
    /// Raw bytes, decoded as UTF-8 (lossy).
    Bytes(Vec<u8>),
    /// Argument tokens, joined with spaces.
    Tokens(Vec<String>),
}

impl CommandSpec {
    /// Produce the command line handed to the shell.
    pub fn normalize(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Self::Tokens(tokens) => tokens.join(" "),
        }
    }

    /// True when there is nothing to execute.
    ///
    /// Only an empty command line counts; blank text is still handed to
    /// the shell.
    pub fn is_empty(&self) -> bool {
        self.normalize().is_empty()
    }
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalize())
    }
}

impl From<&str> for CommandSpec {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CommandSpec {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CommandSpec {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<u8>> for CommandSpec {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for CommandSpec {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(value: Vec<String>) -> Self {
        Self::Tokens(value)
    }
}

impl From<Vec<&str>> for CommandSpec {
    fn from(value: Vec<&str>) -> Self {
        Self::Tokens(value.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for CommandSpec {
    fn from(value: &[&str]) -> Self {
        Self::Tokens(value.iter().map(|s| s.to_string()).collect())
    }
}

/// `None` is the absent command.
impl<T: Into<CommandSpec>> From<Option<T>> for CommandSpec {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passthrough() {
        let spec = CommandSpec::from("ls -la");
        assert_eq!(spec.normalize(), "ls -la");
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_bytes_decoded() {
        let spec = CommandSpec::from(b"ls -axpl".to_vec());
        assert_eq!(spec.normalize(), "ls -axpl");
    }

    #[test]
    fn test_tokens_joined_with_space() {
        let spec = CommandSpec::from(vec!["ls", "-axpl"]);
        assert_eq!(spec.normalize(), "ls -axpl");
    }

    #[test]
    fn test_tokens_are_not_quoted() {
        let spec = CommandSpec::from(vec!["echo", "two words"]);
        assert_eq!(spec.normalize(), "echo two words");
    }

    #[test]
    fn test_none_is_empty() {
        let spec = CommandSpec::from(None::<&str>);
        assert!(spec.is_empty());
        assert!(!CommandSpec::from("   ").is_empty());
        assert!(CommandSpec::from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_some_unwraps() {
        let spec = CommandSpec::from(Some("pwd"));
        assert_eq!(spec, CommandSpec::Text("pwd".into()));
    }
}
