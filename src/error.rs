//! Crate-wide error type.
//!
//! Every failure carries a process exit code and a human-readable message.
//! The `kind` lets the pipeline and the consumers tell transport failures
//! apart from local problems without string matching.

/// Broad failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad flags, missing environment, invalid settings.
    Config,
    /// Acquisition call failed (connection error or non-success status).
    Transport,
    /// A response or file body could not be decoded.
    Parse,
    /// Local filesystem problems (snapshots, exports, log file).
    Io,
    /// Terminal setup or drawing failed.
    Terminal,
}

impl ErrorKind {
    fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Io => 3,
            ErrorKind::Transport | ErrorKind::Parse => 4,
            ErrorKind::Terminal => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.exit_code(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::config("x").exit_code(), 2);
        assert_eq!(AppError::io("x").exit_code(), 3);
        assert_eq!(AppError::transport("x").exit_code(), 4);
        assert_eq!(AppError::parse("x").exit_code(), 4);
        assert_eq!(AppError::terminal("x").exit_code(), 5);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::transport("Failed to fetch daily weather data");
        assert_eq!(err.to_string(), "Failed to fetch daily weather data");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
