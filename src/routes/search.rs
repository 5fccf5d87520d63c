//! # 명언 검색 API 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/search?q=키워드&필터... | 검색어가 있으면 검색, 없으면 브라우즈 |
//! | GET | /api/search/simple?q=키워드 | 레거시 단순 검색 (필터/페이지 없음) |
//!
//! ## 사용 예시
//! ```text
//! GET /api/search                                    ← 인기도순 브라우즈
//! GET /api/search?q=life&page=2&limit=10             ← 관련도순 검색
//! GET /api/search?tags[]=wisdom&tags[]=growth        ← 두 태그를 모두 가진 명언
//! GET /api/search?popularity_min=5&facets=false      ← 패싯 없이
//! ```

use axum::{
    extract::{Query, State},
    Json,
};

use super::AppState;
use crate::{
    error::AppError,
    models::{BrowseResponse, SearchResponse},
    services::{assembler, params},
};

/// `GET /api/search`: 검색/브라우즈 통합 엔드포인트
///
/// `Query<Vec<(String, String)>>`로 쿼리 문자열을 `(키, 값)` 쌍 목록으로 받습니다.
/// 구조체로 바로 역직렬화하면 `tags[]`처럼 반복되는 키를 받을 수 없고,
/// 잘못된 값 하나 때문에 요청 전체가 400이 되기 때문입니다.
///
/// 빈 `q`는 에러가 아니라 브라우즈 모드입니다.
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<BrowseResponse>, AppError> {
    let filters = params::parse_filters(&pairs);
    tracing::debug!(?filters, "search request");

    let response = assembler::search_quotes(&state.pool, &filters).await?;
    Ok(Json(response))
}

/// `GET /api/search/simple`: 레거시 단순 검색
///
/// 이 엔드포인트는 검색어가 필수입니다. 비어 있으면 400을 돌려줍니다.
pub async fn simple_search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = required_query(&pairs)?;

    let response = assembler::plain_search(&state.pool, query).await?;
    Ok(Json(response))
}

/// 마지막 `q` 값을 공백 제거 후 돌려줍니다. 없거나 비어 있으면 400입니다.
fn required_query(pairs: &[(String, String)]) -> Result<&str, AppError> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.trim())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("q parameter is required".to_string()))
}
