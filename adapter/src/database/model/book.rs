use chrono::{DateTime, Utc};
use kernel::model::{
    book::{event::CreateBook, Book, Checkout, CheckoutState, Review},
    id::BookId,
};
use mongodb::bson;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub history: Vec<CheckoutDocument>,
}

// in と review は貸出中のあいだ null になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutDocument {
    pub who: String,
    pub out: bson::DateTime,
    #[serde(rename = "in", default)]
    pub checked_in: Option<bson::DateTime>,
    #[serde(default)]
    pub review: Option<i32>,
}

impl BookDocument {
    pub fn from_event(id: BookId, event: CreateBook) -> Self {
        Self {
            id: id.into_inner(),
            title: event.title,
            author: event.author,
            synopsis: event.synopsis,
            history: Vec::new(),
        }
    }
}

pub fn to_bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_datetime(at: bson::DateTime) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).ok_or_else(|| {
        AppError::ConversionEntityError(format!("timestamp {at} is out of range"))
    })
}

impl From<&Checkout> for CheckoutDocument {
    fn from(value: &Checkout) -> Self {
        let (checked_in, review) = match value.state {
            CheckoutState::Open => (None, None),
            CheckoutState::Closed {
                checked_in_at,
                review,
            } => (
                Some(to_bson_datetime(checked_in_at)),
                Some(i32::from(review.value())),
            ),
        };
        Self {
            who: value.who.clone(),
            out: to_bson_datetime(value.checked_out_at),
            checked_in,
            review,
        }
    }
}

impl TryFrom<CheckoutDocument> for Checkout {
    type Error = AppError;

    fn try_from(value: CheckoutDocument) -> Result<Self, Self::Error> {
        let state = match (value.checked_in, value.review) {
            (None, None) => CheckoutState::Open,
            (Some(checked_in), Some(review)) => CheckoutState::Closed {
                checked_in_at: from_bson_datetime(checked_in)?,
                review: Review::try_from(i64::from(review)).map_err(|_| {
                    AppError::ConversionEntityError(format!("stored review {review} is invalid"))
                })?,
            },
            _ => {
                return Err(AppError::ConversionEntityError(
                    "checkout entry must set `in` and `review` together".into(),
                ))
            }
        };
        Ok(Self {
            who: value.who,
            checked_out_at: from_bson_datetime(value.out)?,
            state,
        })
    }
}

impl TryFrom<BookDocument> for Book {
    type Error = AppError;

    fn try_from(value: BookDocument) -> Result<Self, Self::Error> {
        let BookDocument {
            id,
            title,
            author,
            synopsis,
            history,
        } = value;

        let id = BookId::parse(&id)
            .map_err(|_| AppError::ConversionEntityError("stored book has an empty _id".into()))?;
        let history = history
            .into_iter()
            .map(Checkout::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        // 貸出中のエントリは末尾にしか存在できない
        if history.iter().rev().skip(1).any(Checkout::is_open) {
            return Err(AppError::ConversionEntityError(format!(
                "book {id} has an open checkout before the last history entry"
            )));
        }

        Ok(Book {
            id,
            title,
            author,
            synopsis,
            history,
        })
    }
}

pub fn history_to_bson(history: &[Checkout]) -> AppResult<bson::Bson> {
    let docs: Vec<CheckoutDocument> = history.iter().map(CheckoutDocument::from).collect();
    bson::to_bson(&docs).map_err(|e| AppError::ConversionEntityError(e.to_string()))
}

// 読み込んだ時点の履歴と一致するドキュメントだけに当たるフィルタ。
// history フィールドを持たないドキュメントは空の履歴として読み込まれるので、空の場合はそれも一致させる
pub fn history_filter(book_id: &BookId, previous: &[Checkout]) -> AppResult<bson::Document> {
    let filter = if previous.is_empty() {
        bson::doc! {
            "_id": book_id.as_str(),
            "$or": [
                { "history": [] },
                { "history": { "$exists": false } },
            ],
        }
    } else {
        bson::doc! {
            "_id": book_id.as_str(),
            "history": history_to_bson(previous)?,
        }
    };
    Ok(filter)
}
