//! # 에러 처리 모듈
//!
//! 검색 API에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{"error": "..."}` JSON 응답으로 자동 변환
//!
//! 쿼리 실행 실패와 행(row) 디코딩 실패는 구분하지 않고 모두 500으로 응답합니다.
//! 실제 원인은 서버 로그에만 남깁니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 등록되지 않은 경로 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    /// 파라미터는 관대하게 파싱하므로, 현재는 레거시 검색의 빈 `q`에서만 발생합니다.
    #[error("{0}")]
    BadRequest(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from] 덕분에 sqlx 함수 결과에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    /// 연결 실패, SQL 문법 오류, 행 디코딩 실패가 모두 여기에 해당합니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 이 에러가 어떤 HTTP 상태 코드로 변환되는지 반환합니다.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// DB 에러는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다 (내부 구현 노출 방지).
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::NotFound => self.to_string(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database query failed".to_string()
            }
        };

        // 결과: { "error": "q parameter is required" }
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_shows_its_message() {
        let err = AppError::BadRequest("q parameter is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "q parameter is required");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "q parameter is required" })
        );
    }

    #[tokio::test]
    async fn database_errors_are_opaque_500s() {
        let err = AppError::from(sqlx::Error::Protocol("relation \"quotes\" does not exist".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Database query failed" }));
        assert!(!body.to_string().contains("relation"));
    }

    #[tokio::test]
    async fn not_found_body() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Resource not found" }));
    }
}
