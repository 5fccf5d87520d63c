//! # 조건절(Predicate) 빌더
//!
//! `FilterParams`를 파라미터화된 WHERE 조건으로 번역합니다. 두 가지 방식이 있습니다.
//!
//! ## 구조화 조건 (브라우즈 모드)
//! 비어 있지 않은 필터마다 조건 하나를 만들고 AND로 잇습니다. 순서는 항상 고정입니다.
//! ```sql
//! category = ANY(ARRAY[$1,$2])          -- 카테고리: 하나라도 일치 (OR)
//! AND tags @> ARRAY[$3,$4]::text[]      -- 태그: 전부 포함 (AND)
//! AND popularity >= $5 AND popularity <= $6
//! AND created_at >= $7::timestamp AND created_at < ($8::date + 1)
//! ```
//! `date_to`가 날짜만이면 위처럼 그날 하루를 모두 포함하고,
//! 시각까지 주어지면 `created_at <= $8::timestamp`가 됩니다.
//! 필터가 하나도 없으면 `WHERE 1=1` 같은 조건을 만들지 않고 `None`을 돌려줍니다.
//!
//! ## 전문검색 조건 (검색 모드)
//! 검색어는 항상 BM25 boolean 쿼리의 첫 번째 must 절입니다.
//! 카테고리는 구조화 비교 대신 BM25 인덱스의 term 절로 들어갑니다.
//! 인덱스가 카테고리 값을 랭킹용으로 색인하고 있기 때문입니다.
//! ```sql
//! quotes @@@ paradedb.with_index('quotes_search_idx',
//!     paradedb.boolean(must => ARRAY[paradedb.match('quote', $1), paradedb.term('category', $2)]))
//! AND tags @> ARRAY[$3]::text[] AND ...
//! ```
//!
//! 두 빌더 모두 `FacetField`로 필터 하나를 뺀 채 다시 호출할 수 있습니다.
//! 자리표시자 번호는 `Statement::render`가 매기므로, 무엇을 빼든 번호가 어긋나지 않습니다.

use super::sql::SqlFragment;
use crate::models::{DateBound, FacetField, FilterParams, SearchMode};

/// BM25 인덱스 이름
pub const SEARCH_INDEX: &str = "quotes_search_idx";

/// 모드에 맞는 WHERE 조건을 만듭니다 ("WHERE" 키워드는 포함하지 않음).
///
/// - 브라우즈: 필터가 없으면 `None`
/// - 검색: 전문검색 블록이 항상 있으므로 언제나 `Some`
pub fn where_condition(
    mode: &SearchMode,
    filters: &FilterParams,
    exclude: FacetField,
) -> Option<SqlFragment> {
    let mut predicates = Vec::new();

    match mode {
        SearchMode::Browse => {
            if exclude != FacetField::Categories {
                predicates.extend(category_predicate(&filters.categories));
            }
        }
        SearchMode::Search(query) => {
            let categories: &[String] = if exclude == FacetField::Categories {
                &[]
            } else {
                &filters.categories
            };
            predicates.push(full_text_predicate(query, categories));
        }
    }

    predicates.extend(structured_predicates(filters, exclude));

    if predicates.is_empty() {
        None
    } else {
        Some(SqlFragment::join(predicates, " AND "))
    }
}

/// `category = ANY(ARRAY[...])`: 선택한 카테고리 중 하나라도 일치하면 통과
fn category_predicate(categories: &[String]) -> Option<SqlFragment> {
    if categories.is_empty() {
        return None;
    }

    let mut fragment = SqlFragment::sql("category = ANY(ARRAY[");
    fragment.push_arg_list(categories).push_sql("])");
    Some(fragment)
}

/// BM25 boolean 쿼리 블록. 검색어가 첫 절, 카테고리마다 term 절이 하나씩 붙습니다.
fn full_text_predicate(query: &str, categories: &[String]) -> SqlFragment {
    let mut clauses = Vec::with_capacity(1 + categories.len());

    let mut text_clause = SqlFragment::sql("paradedb.match('quote', ");
    text_clause.push_arg(query).push_sql(")");
    clauses.push(text_clause);

    for category in categories {
        let mut term = SqlFragment::sql("paradedb.term('category', ");
        term.push_arg(category).push_sql(")");
        clauses.push(term);
    }

    let mut fragment = SqlFragment::sql(format!(
        "quotes @@@ paradedb.with_index('{SEARCH_INDEX}', paradedb.boolean(must => ARRAY["
    ));
    fragment
        .append(SqlFragment::join(clauses, ", "))
        .push_sql("]))");
    fragment
}

/// 두 모드가 공유하는 구조화 조건: 태그, 인기도, 날짜 (이 순서 그대로)
fn structured_predicates(filters: &FilterParams, exclude: FacetField) -> Vec<SqlFragment> {
    let mut predicates = Vec::new();

    // 태그는 "모두 포함" 의미이므로 배열 포함 연산자 @>를 씁니다.
    if exclude != FacetField::Tags && !filters.tags.is_empty() {
        let mut fragment = SqlFragment::sql("tags @> ARRAY[");
        fragment.push_arg_list(&filters.tags).push_sql("]::text[]");
        predicates.push(fragment);
    }

    if exclude != FacetField::Popularity {
        if let Some(min) = filters.popularity_min {
            predicates.push(comparison("popularity >= ", min, ""));
        }
        if let Some(max) = filters.popularity_max {
            predicates.push(comparison("popularity <= ", max, ""));
        }
    }

    // 날짜는 UTC 기준 문자열로 바인딩되므로 컬럼 타입에 맞게 캐스팅합니다.
    if let Some(from) = filters.date_from {
        predicates.push(comparison("created_at >= ", from.to_string(), "::timestamp"));
    }
    match filters.date_to {
        // 날짜만 주어지면 다음 날 0시 전까지가 "그날 포함"입니다.
        Some(to @ DateBound::Day(_)) => {
            predicates.push(comparison("created_at < (", to.to_string(), "::date + 1)"));
        }
        Some(to @ DateBound::Instant(_)) => {
            predicates.push(comparison("created_at <= ", to.to_string(), "::timestamp"));
        }
        None => {}
    }

    predicates
}

fn comparison(
    prefix: &str,
    value: impl Into<super::sql::SqlArg>,
    suffix: &str,
) -> SqlFragment {
    let mut fragment = SqlFragment::sql(prefix);
    fragment.push_arg(value);
    if !suffix.is_empty() {
        fragment.push_sql(suffix);
    }
    fragment
}
