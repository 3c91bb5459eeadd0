use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

use super::id::BookId;

pub mod event;

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub synopsis: String,
    pub history: Vec<Checkout>,
}

// ページネーションの範囲を指定するための設定値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookListOptions {
    pub limit: i64,
    pub offset: i64,
}

// 貸出 1 回分。履歴には追記のみで、貸出中でいられるのは末尾のエントリだけ
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub who: String,
    pub checked_out_at: DateTime<Utc>,
    pub state: CheckoutState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutState {
    Open,
    Closed {
        checked_in_at: DateTime<Utc>,
        review: Review,
    },
}

impl Checkout {
    pub fn is_open(&self) -> bool {
        matches!(self.state, CheckoutState::Open)
    }

    pub fn checked_in_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            CheckoutState::Open => None,
            CheckoutState::Closed { checked_in_at, .. } => Some(checked_in_at),
        }
    }

    pub fn review(&self) -> Option<Review> {
        match self.state {
            CheckoutState::Open => None,
            CheckoutState::Closed { review, .. } => Some(review),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Review(u8);

impl Review {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Review {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(AppError::ReviewMissing)
    }
}

// 返却済みのエントリをレビューとして見たもの。id は履歴内の位置（1 始まり）
#[derive(Debug, Clone, PartialEq)]
pub struct BookReview {
    pub id: usize,
    pub who: String,
    pub review: Review,
    pub reviewed_at: DateTime<Utc>,
}

pub(crate) fn validate_required(title: &str, author: &str) -> AppResult<()> {
    if title.trim().is_empty() || author.trim().is_empty() {
        return Err(AppError::RequiredFieldMissing);
    }
    Ok(())
}

impl Book {
    pub fn validate(&self) -> AppResult<()> {
        validate_required(&self.title, &self.author)
    }

    pub fn current_checkout(&self) -> Option<&Checkout> {
        self.history.last().filter(|c| c.is_open())
    }

    pub fn is_checked_out(&self) -> bool {
        self.current_checkout().is_some()
    }

    // 貸出中かどうかを名前より先に確認する。両方に違反する場合は BookAlreadyCheckedOut になる
    pub fn checkout(&mut self, who: &str, at: DateTime<Utc>) -> AppResult<()> {
        if self.is_checked_out() {
            return Err(AppError::BookAlreadyCheckedOut);
        }
        if who.trim().is_empty() {
            return Err(AppError::NameMissing);
        }

        self.history.push(Checkout {
            who: who.to_string(),
            checked_out_at: at,
            state: CheckoutState::Open,
        });
        Ok(())
    }

    // レビューの範囲は貸出中のエントリがあると確認できてから検証する。エラー時は履歴を変更しない
    pub fn checkin(&mut self, review: i64, at: DateTime<Utc>) -> AppResult<()> {
        let Some(open) = self.history.last_mut().filter(|c| c.is_open()) else {
            return Err(AppError::BookNotCheckedOut);
        };
        let review = Review::try_from(review)?;

        open.state = CheckoutState::Closed {
            checked_in_at: at,
            review,
        };
        Ok(())
    }

    pub fn reviews(&self) -> Vec<BookReview> {
        self.history
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match c.state {
                CheckoutState::Open => None,
                CheckoutState::Closed {
                    checked_in_at,
                    review,
                } => Some(BookReview {
                    id: i + 1,
                    who: c.who.clone(),
                    review,
                    reviewed_at: checked_in_at,
                }),
            })
            .collect()
    }

    pub fn review(&self, review_id: usize) -> AppResult<BookReview> {
        self.reviews()
            .into_iter()
            .find(|r| r.id == review_id)
            .ok_or(AppError::ReviewNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn dune() -> Book {
        Book {
            id: BookId::parse("1").unwrap(),
            title: "Dune".into(),
            author: "Herbert".into(),
            synopsis: String::new(),
            history: vec![],
        }
    }

    fn lent_to_alice() -> Book {
        let mut book = dune();
        book.checkout("Alice", at(9)).unwrap();
        book
    }

    #[rstest]
    #[case("", "Herbert")]
    #[case("Dune", "")]
    #[case("  ", "Herbert")]
    #[case("", "")]
    fn validate_requires_title_and_author(#[case] title: &str, #[case] author: &str) {
        let book = Book {
            title: title.into(),
            author: author.into(),
            ..dune()
        };
        assert!(matches!(book.validate(), Err(AppError::RequiredFieldMissing)));
    }

    #[test]
    fn second_checkout_without_checkin_is_rejected() {
        let mut book = dune();
        book.checkout("Alice", at(9)).unwrap();

        let result = book.checkout("Bob", at(10));

        assert!(matches!(result, Err(AppError::BookAlreadyCheckedOut)));
        assert_eq!(book.history.len(), 1);
        assert_eq!(book.history[0].who, "Alice");
    }

    #[test]
    fn checkout_appends_an_open_entry() {
        let book = lent_to_alice();

        let entry = book.current_checkout().unwrap();
        assert_eq!(entry.who, "Alice");
        assert_eq!(entry.checked_out_at, at(9));
        assert_eq!(entry.checked_in_at(), None);
        assert_eq!(entry.review(), None);
    }

    #[test]
    fn checkout_requires_a_name() {
        let mut book = dune();
        assert!(matches!(book.checkout("", at(9)), Err(AppError::NameMissing)));
        assert!(book.history.is_empty());
    }

    #[test]
    fn checked_out_state_wins_over_missing_name() {
        let mut book = lent_to_alice();
        assert!(matches!(
            book.checkout("", at(10)),
            Err(AppError::BookAlreadyCheckedOut)
        ));
    }

    #[test]
    fn checkin_closes_the_open_entry() {
        let mut book = lent_to_alice();

        book.checkin(4, at(12)).unwrap();

        let entry = &book.history[0];
        assert_eq!(entry.who, "Alice");
        assert_eq!(entry.checked_out_at, at(9));
        assert_eq!(entry.checked_in_at(), Some(at(12)));
        assert_eq!(entry.review().map(Review::value), Some(4));
        assert!(!book.is_checked_out());
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(256)]
    fn out_of_range_review_leaves_history_unchanged(#[case] review: i64) {
        let mut book = lent_to_alice();
        let before = book.history.clone();

        let result = book.checkin(review, at(12));

        assert!(matches!(result, Err(AppError::ReviewMissing)));
        assert_eq!(book.history, before);
    }

    #[test]
    fn checkin_without_history_is_rejected() {
        let mut book = dune();
        assert!(matches!(
            book.checkin(3, at(12)),
            Err(AppError::BookNotCheckedOut)
        ));
    }

    #[test]
    fn checkin_twice_fails_the_second_time() {
        let mut book = lent_to_alice();
        book.checkin(5, at(12)).unwrap();

        assert!(matches!(
            book.checkin(5, at(13)),
            Err(AppError::BookNotCheckedOut)
        ));
    }

    #[test]
    fn open_entry_is_checked_before_review_range() {
        let mut book = dune();
        assert!(matches!(
            book.checkin(9, at(12)),
            Err(AppError::BookNotCheckedOut)
        ));
    }

    #[test]
    fn book_can_be_lent_again_after_checkin() {
        let mut book = lent_to_alice();
        book.checkin(2, at(12)).unwrap();

        book.checkout("Bob", at(14)).unwrap();

        assert_eq!(book.history.len(), 2);
        assert_eq!(book.current_checkout().unwrap().who, "Bob");
    }

    #[test]
    fn reviews_list_closed_entries_by_position() {
        let mut book = lent_to_alice();
        book.checkin(2, at(12)).unwrap();
        book.checkout("Bob", at(14)).unwrap();

        let reviews = book.reviews();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, 1);
        assert_eq!(reviews[0].who, "Alice");
        assert_eq!(reviews[0].reviewed_at, at(12));
        assert!(matches!(book.review(2), Err(AppError::ReviewNotFound)));
    }
}
