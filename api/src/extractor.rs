use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared::error::AppError;

// axum の Json エクストラクタの代わりに使う。失敗理由をドメインのエラーで返したいため
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::UnableToReadMessage)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::EmptyRequestBody);
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|_| AppError::UnableToParseJson)
    }
}

// Query の拒否は素のテキストで返るので、JSON のエラーボディに揃える
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{book::BookListQuery, checkout::CheckoutRequest};
    use axum::body::Body;

    async fn extract(body: &'static str) -> Result<JsonBody<CheckoutRequest>, AppError> {
        JsonBody::from_request(Request::new(Body::from(body)), &()).await
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        assert!(matches!(extract("").await, Err(AppError::EmptyRequestBody)));
        assert!(matches!(extract(" \n").await, Err(AppError::EmptyRequestBody)));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        assert!(matches!(
            extract(r#"{"who": "#).await,
            Err(AppError::UnableToParseJson)
        ));
    }

    #[tokio::test]
    async fn valid_json_is_decoded() {
        let JsonBody(req) = extract(r#"{"who": "Alice"}"#).await.unwrap();
        assert_eq!(req.who, "Alice");
    }

    async fn extract_query(uri: &'static str) -> Result<QueryParams<BookListQuery>, AppError> {
        let (mut parts, _) = Request::get(uri).body(Body::empty()).unwrap().into_parts();
        QueryParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn non_numeric_paginator_is_an_invalid_query() {
        let err = extract_query("/books?limit=abc").await.unwrap_err();

        assert!(matches!(err, AppError::InvalidQuery(_)));
        assert!(err.to_string().contains("limit"));
    }

    #[tokio::test]
    async fn paginator_defaults_apply_to_missing_keys() {
        let QueryParams(query) = extract_query("/books?offset=40").await.unwrap();

        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 40);
    }
}
