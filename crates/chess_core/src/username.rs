use std::fmt;

use crate::error::{ChessApiError, Result};

/// A Chess.com username, trimmed and lower-cased.
///
/// Chess.com treats usernames case-insensitively, so every request path is
/// built from this normalized form. `.` and `..` are refused: URL parsing
/// resolves them as dot segments even when percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChessApiError::InvalidUsername);
        }
        if trimmed == "." || trimmed == ".." {
            return Err(ChessApiError::UnaddressableUsername {
                username: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
