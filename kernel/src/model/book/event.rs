use shared::error::AppResult;

use super::{validate_required, Checkout};
use crate::model::id::BookId;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub synopsis: String,
}

impl CreateBook {
    pub fn validate(&self) -> AppResult<()> {
        validate_required(&self.title, &self.author)
    }
}

// 保存済みの履歴が previous と一致する場合に限り、履歴を置き換える
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBookHistory {
    pub book_id: BookId,
    pub previous: Vec<Checkout>,
    pub history: Vec<Checkout>,
}
