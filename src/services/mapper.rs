//! # 결과 매퍼(Result Mapper)
//!
//! DB에서 디코딩된 행(`QuoteRow`)을 API 엔티티(`Quote`)로 바꿉니다.
//!
//! - NULL 컬럼은 `None`으로 남깁니다. 0이나 빈 문자열로 바꾸지 않습니다.
//! - `created_at`은 저장 타입과 상관없이 한 가지 문자열 형식으로 정규화합니다.
//!   형식: RFC 3339, UTC, 초 단위, `Z` 접미사 (예: `2025-08-02T05:31:47Z`)
//!
//! 행 디코딩 실패는 이미 `fetch_all` 단계에서 첫 에러로 전체가 실패하므로,
//! 여기까지 온 행 목록은 항상 완전합니다.

use chrono::{NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::models::{FacetItem, FacetRow, PopularityRange, Quote, QuoteRow};

/// 행 하나를 `Quote`로 변환합니다.
pub fn map_quote(row: QuoteRow) -> Quote {
    Quote {
        id: row.id,
        quote: row.quote,
        author: row.author,
        category: row.category,
        tags: row.tags.unwrap_or_default(),
        popularity: row.popularity,
        created_at: row.created_at.map(format_timestamp),
        relevance: row.relevance,
        highlighted_quote: row.highlighted_quote,
    }
}

/// 행 목록 전체를 변환합니다. 입력 순서(= SQL 정렬 순서)를 그대로 유지합니다.
pub fn map_quotes(rows: Vec<QuoteRow>) -> Vec<Quote> {
    rows.into_iter().map(map_quote).collect()
}

/// `TIMESTAMP`(시간대 없음) 값을 UTC로 간주하여 RFC 3339 문자열로 만듭니다.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&timestamp)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 패싯 행을 `FacetItem`으로 바꿉니다. 값이 NULL인 행은 버립니다.
pub fn map_facets(rows: Vec<FacetRow>) -> Vec<FacetItem> {
    rows.into_iter()
        .filter_map(|row| row.value.map(|value| FacetItem { value, count: row.count }))
        .collect()
}

/// MIN/MAX 결과를 범위로 바꿉니다. 둘 중 하나라도 NULL이면 범위가 없는 것입니다.
pub fn map_range(range: (Option<f64>, Option<f64>)) -> Option<PopularityRange> {
    match range {
        (Some(min), Some(max)) => Some(PopularityRange { min, max }),
        _ => None,
    }
}
