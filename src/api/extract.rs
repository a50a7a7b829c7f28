//! Extractors whose rejections are reported as `AppError::InvalidArgument`, so a malformed
//! body, path or query gets the same `{"error": ...}` response as any other bad input.

use axum::extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    FromRequest, FromRequestParts,
};

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Count {
        #[allow(dead_code)]
        count: i64,
    }

    #[tokio::test]
    async fn test_bad_query_becomes_invalid_argument() {
        let request = Request::builder()
            .uri("/films/popular?count=abc")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = AppQuery::<Count>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::InvalidArgument(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
