use lumen_core::{FramebufferError, TextureError};
use thiserror::Error;

/// Errors raised while running a script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: '{command}' before any png target")]
    MissingTarget { line: usize, command: String },

    #[error("script never declares a png target")]
    NoTarget,

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Framebuffer error: {0}")]
    Framebuffer(#[from] FramebufferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    /// Fatal errors abort the run; the rest skip the offending line.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScriptError::Texture(_) | ScriptError::Io(_) | ScriptError::NoTarget
        )
    }
}

pub type ScriptResult<T> = Result<T, ScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ScriptError::NoTarget.is_fatal());
        assert!(ScriptError::Texture(TextureError::LoadError("x".into())).is_fatal());
        assert!(!ScriptError::InvalidNumber {
            line: 3,
            token: "abc".into()
        }
        .is_fatal());
        assert!(!ScriptError::MissingTarget {
            line: 1,
            command: "depth".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_messages_carry_line_numbers() {
        let e = ScriptError::Malformed {
            line: 7,
            message: "expected 4 arguments".into(),
        };
        assert_eq!(e.to_string(), "line 7: expected 4 arguments");
    }
}
