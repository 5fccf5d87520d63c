//! # 쿼리 컴파일러
//!
//! 조건절, 정렬, 페이지네이션, 프로젝션을 합쳐 실행 가능한 `Statement`를 만듭니다.
//!
//! | 문장 | 용도 |
//! |------|------|
//! | `main_query` | 결과 목록 (모드별 프로젝션/정렬, LIMIT/OFFSET) |
//! | `count_query` | 같은 조건의 전체 건수 |
//! | `category_facet_query` | 카테고리 필터를 뺀 카테고리별 건수 |
//! | `tag_facet_query` | 태그 필터를 뺀 태그별 건수 (`unnest`) |
//! | `popularity_range_query` | 인기도 필터를 뺀 MIN/MAX |
//! | `plain_search_query` | 레거시 단순 검색 (필터 없음, 상위 20건) |
//!
//! 모든 함수는 순수 함수이고 DB에 접근하지 않습니다. 실행은 `db::executor`가 맡습니다.

use super::predicates::where_condition;
use super::sql::{SqlFragment, Statement};
use crate::models::{FacetField, FilterParams, SearchMode, SortField};

/// 레거시 단순 검색의 결과 수
pub const PLAIN_SEARCH_LIMIT: i64 = 20;

// `QuoteRow` 하나로 두 모드를 디코딩할 수 있도록 컬럼 목록과 타입을 맞춰 둡니다.
// DECIMAL/REAL 컬럼은 float8로 캐스팅해 f64 하나로 통일합니다.
const BROWSE_COLUMNS: &str = "id, quote, author, category, tags, \
     popularity::float8 AS popularity, created_at, \
     NULL::float8 AS relevance, NULL::text AS highlighted_quote";

const SEARCH_COLUMNS: &str = "id, quote, author, category, tags, \
     popularity::float8 AS popularity, created_at, \
     paradedb.score(id)::float8 AS relevance, \
     paradedb.snippet(quote) AS highlighted_quote";

/// 결과 목록 쿼리
///
/// 브라우즈는 사용자가 고른 정렬을, 검색은 항상 관련도 내림차순을 씁니다.
pub fn main_query(mode: &SearchMode, filters: &FilterParams) -> Statement {
    let columns = match mode {
        SearchMode::Browse => BROWSE_COLUMNS,
        SearchMode::Search(_) => SEARCH_COLUMNS,
    };

    let mut fragment = select_where(
        &format!("SELECT {columns} FROM quotes"),
        where_condition(mode, filters, FacetField::None),
        None,
    );
    fragment
        .push_sql(" ")
        .push_sql(order_by(mode, filters))
        .push_sql(" LIMIT ")
        .push_arg(filters.limit)
        .push_sql(" OFFSET ")
        .push_arg(filters.offset());

    Statement::render(fragment)
}

/// 전체 건수 쿼리. 메인 쿼리와 같은 조건을 쓰고 정렬/LIMIT은 없습니다.
pub fn count_query(mode: &SearchMode, filters: &FilterParams) -> Statement {
    Statement::render(select_where(
        "SELECT COUNT(*) FROM quotes",
        where_condition(mode, filters, FacetField::None),
        None,
    ))
}

/// 카테고리 패싯: 카테고리 필터만 빼고 나머지 필터는 그대로 적용합니다.
///
/// 이미 선택한 카테고리 외에 "지금 조건에서 고를 수 있는 다른 카테고리"를 보여주기 위함입니다.
pub fn category_facet_query(mode: &SearchMode, filters: &FilterParams) -> Statement {
    let mut fragment = select_where(
        "SELECT category AS value, COUNT(*) AS count FROM quotes",
        where_condition(mode, filters, FacetField::Categories),
        Some("category IS NOT NULL"),
    );
    fragment
        .push_sql(" GROUP BY category ORDER BY count DESC, value ASC LIMIT ")
        .push_arg(filters.facet_limit);

    Statement::render(fragment)
}

/// 태그 패싯: 태그 필터만 빼고, 태그 배열을 행으로 펼쳐(`unnest`) 셉니다.
pub fn tag_facet_query(mode: &SearchMode, filters: &FilterParams) -> Statement {
    let mut fragment = select_where(
        "SELECT unnest(tags) AS value, COUNT(*) AS count FROM quotes",
        where_condition(mode, filters, FacetField::Tags),
        None,
    );
    fragment
        .push_sql(" GROUP BY value ORDER BY count DESC, value ASC LIMIT ")
        .push_arg(filters.facet_limit);

    Statement::render(fragment)
}

/// 인기도 범위: 인기도 필터만 빼고 MIN/MAX를 구합니다.
///
/// 인기도가 있는 행이 하나도 없으면 두 값이 모두 NULL로 옵니다.
pub fn popularity_range_query(mode: &SearchMode, filters: &FilterParams) -> Statement {
    Statement::render(select_where(
        "SELECT MIN(popularity)::float8, MAX(popularity)::float8 FROM quotes",
        where_condition(mode, filters, FacetField::Popularity),
        Some("popularity IS NOT NULL"),
    ))
}

/// 레거시 단순 검색: 본문/저자/태그/카테고리 중 어디든 매칭되면 결과에 포함합니다.
///
/// 같은 검색어를 네 번 바인딩합니다. 자리표시자를 재사용하지 않는 규칙을 여기서도 지킵니다.
pub fn plain_search_query(query: &str) -> Statement {
    let mut fragment = SqlFragment::sql(format!("SELECT {SEARCH_COLUMNS} FROM quotes WHERE "));

    let fields = ["quote", "author", "tags", "category"];
    let clauses = fields.iter().map(|field| {
        let mut clause = SqlFragment::sql(format!("{field} @@@ "));
        clause.push_arg(query);
        clause
    });
    fragment
        .append(SqlFragment::join(clauses, " OR "))
        .push_sql(" ORDER BY paradedb.score(id) DESC LIMIT ")
        .push_arg(PLAIN_SEARCH_LIMIT);

    Statement::render(fragment)
}

/// ORDER BY 절
///
/// - 검색: 관련도 내림차순 고정 (사용자가 바꿀 수 없음)
/// - 브라우즈 random: `RANDOM()`, 정렬 방향은 무시
/// - 브라우즈 그 외: NULL은 뒤로, 동점은 id 오름차순으로 정렬해 페이지 경계를 고정합니다
pub fn order_by(mode: &SearchMode, filters: &FilterParams) -> String {
    if let SearchMode::Search(_) = mode {
        return "ORDER BY paradedb.score(id) DESC, id ASC".to_string();
    }

    let column = match filters.sort {
        SortField::Random => return "ORDER BY RANDOM()".to_string(),
        SortField::Popularity => "popularity",
        SortField::CreatedAt => "created_at",
    };

    format!(
        "ORDER BY {column} {} NULLS LAST, id ASC",
        filters.order.as_sql()
    )
}

/// `<select> [WHERE <condition> [AND <extra>]]`
fn select_where(select: &str, condition: Option<SqlFragment>, extra: Option<&str>) -> SqlFragment {
    let mut fragment = SqlFragment::sql(select);

    let mut parts: Vec<SqlFragment> = condition
        .into_iter()
        .filter(|condition| !condition.is_empty())
        .collect();
    if let Some(extra) = extra {
        parts.push(SqlFragment::sql(extra));
    }

    if !parts.is_empty() {
        fragment
            .push_sql(" WHERE ")
            .append(SqlFragment::join(parts, " AND "));
    }
    fragment
}
