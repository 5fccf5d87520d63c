//! # 응답 조립기(Response Assembler)
//!
//! 요청 하나에 필요한 쿼리들을 실행하고 응답 봉투를 조립합니다.
//!
//! ## 처리 흐름
//! 1. 메인 쿼리 → 행 매핑 → `Quote` 목록
//! 2. 같은 조건의 카운트 쿼리 → `total_count`
//! 3. `(page, limit, total_count)` → `Pagination`
//! 4. `FilterParams` → `ActiveFilters` (쿼리 없음)
//! 5. `include_facets`이면 카테고리/태그/인기도 범위 쿼리 3개
//! 6. 봉투 조립. 검색 모드면 검색어도 함께 담습니다.
//!
//! 1, 2, 5의 쿼리들은 서로의 결과에 의존하지 않으므로 `tokio::try_join!`으로
//! 동시에 실행합니다 (요청당 최대 5개). 하나라도 실패하면 나머지를 기다리지 않고
//! 첫 에러를 그대로 돌려줍니다. 부분 응답은 만들지 않습니다.

use std::time::Instant;

use crate::db::{statements, QueryExecutor};
use crate::error::AppError;
use crate::models::{
    ActiveFilters, BrowseResponse, Facets, FilterParams, Pagination, SearchMode, SearchResponse,
};
use crate::services::mapper;

/// `/api/search`: 검색어 유무에 따라 브라우즈/검색 모드로 결과를 조립합니다.
pub async fn search_quotes<E>(executor: &E, filters: &FilterParams) -> Result<BrowseResponse, AppError>
where
    E: QueryExecutor + ?Sized,
{
    let mode = filters.mode();
    let started = Instant::now();

    let main = statements::main_query(&mode, filters);
    let count = statements::count_query(&mode, filters);

    let (rows, total_count, facets) = tokio::try_join!(
        executor.fetch_quotes(&main),
        executor.fetch_count(&count),
        load_facets(executor, &mode, filters),
    )?;

    let quotes = mapper::map_quotes(rows);

    tracing::debug!(
        mode = mode_name(&mode),
        returned = quotes.len(),
        total_count,
        facets = facets.is_some(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "quotes query completed"
    );

    let query = match mode {
        SearchMode::Search(query) => Some(query),
        SearchMode::Browse => None,
    };

    Ok(BrowseResponse {
        quotes,
        pagination: Pagination::new(filters.page, filters.limit, total_count),
        facets,
        active_filters: ActiveFilters::from(filters),
        query,
    })
}

/// `/api/search/simple`: 필터 없는 레거시 검색 (상위 20건, 페이지네이션 없음)
pub async fn plain_search<E>(executor: &E, query: &str) -> Result<SearchResponse, AppError>
where
    E: QueryExecutor + ?Sized,
{
    let statement = statements::plain_search_query(query);
    let results = mapper::map_quotes(executor.fetch_quotes(&statement).await?);

    tracing::debug!(query, returned = results.len(), "plain search completed");

    Ok(SearchResponse {
        count: results.len(),
        results,
        query: query.to_string(),
    })
}

/// 패싯 블록. `include_facets`가 false면 쿼리를 하나도 실행하지 않습니다.
async fn load_facets<E>(
    executor: &E,
    mode: &SearchMode,
    filters: &FilterParams,
) -> Result<Option<Facets>, AppError>
where
    E: QueryExecutor + ?Sized,
{
    if !filters.include_facets {
        return Ok(None);
    }

    let category_statement = statements::category_facet_query(mode, filters);
    let tag_statement = statements::tag_facet_query(mode, filters);
    let range_statement = statements::popularity_range_query(mode, filters);

    let (categories, tags, range) = tokio::try_join!(
        executor.fetch_facets(&category_statement),
        executor.fetch_facets(&tag_statement),
        executor.fetch_range(&range_statement),
    )?;

    Ok(Some(Facets {
        categories: mapper::map_facets(categories),
        tags: mapper::map_facets(tags),
        popularity_range: mapper::map_range(range),
    }))
}

fn mode_name(mode: &SearchMode) -> &'static str {
    match mode {
        SearchMode::Browse => "browse",
        SearchMode::Search(_) => "search",
    }
}
