use chrono::{DateTime, Utc};
use kernel::model::book::{Checkout, Review};
use serde::{Deserialize, Serialize};

// 欠けている項目は空文字・0 として受け取り、検証はカーネル側に任せる
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    pub who: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckinRequest {
    pub review: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub who: String,
    pub out: DateTime<Utc>,
    #[serde(rename = "in")]
    pub checked_in: Option<DateTime<Utc>>,
    pub review: Option<u8>,
}

impl From<&Checkout> for CheckoutResponse {
    fn from(value: &Checkout) -> Self {
        Self {
            who: value.who.clone(),
            out: value.checked_out_at,
            checked_in: value.checked_in_at(),
            review: value.review().map(Review::value),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutHistoryResponse {
    pub items: Vec<CheckoutResponse>,
}
