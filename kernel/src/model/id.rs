use std::fmt;

use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    // 空（空白のみを含む）の ID はストアに問い合わせる前に弾く
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Err(AppError::EmptyBookId);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(BookId::parse(""), Err(AppError::EmptyBookId)));
        assert!(matches!(BookId::parse("   "), Err(AppError::EmptyBookId)));
    }

    #[test]
    fn non_blank_ids_are_kept_verbatim() {
        let id = BookId::parse(" 1").unwrap();
        assert_eq!(id.as_str(), " 1");
        assert_ne!(id, BookId::parse("1").unwrap());
    }
}
