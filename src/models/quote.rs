//! # 명언(Quote) 모델 정의
//!
//! - `QuoteRow`: DB 결과 한 행을 그대로 담는 구조체 (sqlx가 디코딩)
//! - `Quote`: API 응답으로 나가는 엔티티
//! - `FacetRow`: 패싯 집계 쿼리의 결과 한 행
//!
//! `QuoteRow` → `Quote` 변환은 `services::mapper`가 담당합니다.

use chrono::NaiveDateTime;
use serde::Serialize;

/// `quotes` 테이블 조회 결과 한 행
///
/// 브라우즈 모드와 검색 모드가 같은 컬럼 목록을 프로젝션하므로
/// 하나의 구조체로 두 모드를 모두 디코딩합니다.
/// 브라우즈 모드에서는 `relevance`, `highlighted_quote`가 항상 NULL입니다.
///
/// `popularity`(DECIMAL)와 `relevance`(REAL)는 SQL에서 `float8`로 캐스팅되어 옵니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuoteRow {
    pub id: i32,
    pub quote: String,
    pub author: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub popularity: Option<f64>,
    pub created_at: Option<NaiveDateTime>,
    pub relevance: Option<f64>,
    pub highlighted_quote: Option<String>,
}

/// API 응답의 명언 엔티티
///
/// `Option` 필드는 값이 없으면 JSON에서 아예 빠집니다.
/// 0이나 빈 문자열로 채우지 않으므로 "없음"과 "0"이 구분됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub id: i32,
    pub quote: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    /// RFC 3339 형식의 생성 시각 (예: "2025-08-02T05:31:47Z")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// BM25 관련도 점수 (검색 모드 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    /// 검색어가 강조된 스니펫 (검색 모드 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_quote: Option<String>,
}

/// 패싯 집계 결과 한 행: `SELECT <값> AS value, COUNT(*) AS count ...`
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FacetRow {
    pub value: Option<String>,
    pub count: i64,
}
