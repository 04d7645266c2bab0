//! User-visible notices
//!
//! Every outcome the accounts screen reports (success, server failure,
//! network failure, validation) ends up as a [`Notice`]. Notices are plain
//! data; rendering them is left to whatever front end drives the screen.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    /// Local input problem, nothing was sent
    Validation,
}

/// A short message surfaced to the user after an action completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error | NoticeKind::Validation)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
            NoticeKind::Validation => "Validation",
        };
        write!(f, "{}: {}", prefix, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        assert_eq!(
            Notice::success("Account updated successfully").to_string(),
            "Success: Account updated successfully"
        );
        assert_eq!(Notice::error("Failed to delete").to_string(), "Error: Failed to delete");
    }

    #[test]
    fn test_validation_counts_as_error() {
        assert!(Notice::validation("x").is_error());
        assert!(Notice::error("x").is_error());
        assert!(!Notice::success("x").is_error());
    }
}
