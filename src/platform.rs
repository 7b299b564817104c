//! Host platform detection and default shell selection.

/// Flags describing the host operating system.
///
/// Build it once at startup with [`Platform::detect`] and hand it to the
/// pieces that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Raw OS identifier (`linux`, `macos`, `windows`, ...).
    pub os: String,
    /// Running on Windows.
    pub is_win: bool,
    /// Running on a Darwin-based system.
    pub is_darwin: bool,
    /// Running on Linux.
    pub is_linux: bool,
}

impl Platform {
    /// Detect the platform the binary was built for.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Build flags from an OS identifier.
    pub fn from_os(os: &str) -> Self {
        let os = os.to_ascii_lowercase();
        Self {
            is_win: os == "windows" || os == "win32",
            is_darwin: matches!(os.as_str(), "macos" | "darwin" | "ios"),
            is_linux: os == "linux",
            os,
        }
    }

    /// Shell used when none is configured.
    ///
    /// On Unix this is `$SHELL`, falling back to `/bin/sh`.
    pub fn default_shell(&self) -> String {
        if self.is_win {
            "powershell.exe".to_string()
        } else {
            std::env::var("SHELL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "/bin/sh".to_string())
        }
    }

    /// Arguments placed between the shell and the command text.
    ///
    /// Unix shells run as a login shell (`-l -c <command>`); powershell
    /// takes the command text directly. Powershell joins its positional
    /// arguments into one command, so an empty leading argument is left out
    /// here; pass `shell_args([""])` to the options to keep it.
    pub fn default_shell_args(&self) -> Vec<String> {
        if self.is_win {
            Vec::new()
        } else {
            vec!["-l".to_string(), "-c".to_string()]
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_linux() {
        let p = Platform::from_os("linux");
        assert!(p.is_linux);
        assert!(!p.is_win);
        assert!(!p.is_darwin);
    }

    #[test]
    fn test_from_os_darwin() {
        assert!(Platform::from_os("macos").is_darwin);
        assert!(Platform::from_os("darwin").is_darwin);
    }

    #[test]
    fn test_from_os_windows() {
        let p = Platform::from_os("windows");
        assert!(p.is_win);
        assert_eq!(p.default_shell(), "powershell.exe");
        assert!(p.default_shell_args().is_empty());
    }

    #[test]
    fn test_unix_shell_args() {
        let p = Platform::from_os("linux");
        assert_eq!(p.default_shell_args(), vec!["-l", "-c"]);
        assert!(!p.default_shell().is_empty());
    }

    #[test]
    fn test_detect_matches_cfg() {
        let p = Platform::detect();
        assert_eq!(p.is_win, cfg!(windows));
        assert_eq!(p.is_linux, cfg!(target_os = "linux"));
        assert_eq!(p.is_darwin, cfg!(target_os = "macos"));
    }
}
