//! # 필터 모델 정의
//!
//! 요청 하나에 대해 한 번 만들어지고 이후 변경되지 않는 필터 파라미터입니다.
//! 이 모듈에는 로직이 거의 없습니다. 값의 모양과 기본값, 그리고
//! 검색 모드 판별, 날짜 경계값 해석만 담당합니다. 쿼리 문자열 파싱은 `services::params`에 있습니다.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 페이지 번호 기본값
pub const DEFAULT_PAGE: i64 = 1;
/// 페이지당 결과 수 기본값
pub const DEFAULT_LIMIT: i64 = 20;
/// 페이지당 결과 수 상한
pub const MAX_LIMIT: i64 = 100;
/// 패싯 목록 길이 기본값
pub const DEFAULT_FACET_LIMIT: i64 = 10;

/// 브라우즈 모드의 정렬 기준
///
/// 검색 모드에서는 항상 관련도순으로 정렬되며 이 값은 무시됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Popularity,
    CreatedAt,
    /// `RANDOM()` 정렬. 정렬 방향은 무시되고, 페이지 경계도 안정적이지 않습니다.
    Random,
}

impl SortField {
    /// 알 수 없는 값은 `Popularity`로 대체합니다.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "popularity" => SortField::Popularity,
            "created_at" => SortField::CreatedAt,
            "random" => SortField::Random,
            _ => SortField::default(),
        }
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// 알 수 없는 값은 `Desc`로 대체합니다.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => SortOrder::default(),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 날짜 필터의 경계값
///
/// `created_at`은 시간대 없는 TIMESTAMP이고 UTC로 저장되어 있습니다.
/// 그래서 시간대가 붙은 입력은 파싱 단계에서 UTC 기준 시각으로 바꿔 둡니다.
/// 날짜만 주어진 경우는 "그날 하루 전체"를 뜻하므로 시각과 구분해서 보관합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// `2024-12-31`
    Day(NaiveDate),
    /// `2024-12-31T14:59:59` (UTC)
    Instant(NaiveDateTime),
}

impl DateBound {
    /// 날짜로 해석되는 문자열만 받아들입니다.
    ///
    /// 허용 형식: `2024-01-31`, `2024-01-31T10:00:00`, `2024-01-31 10:00:00.5`,
    /// `2024-01-31T10:00:00+09:00` (RFC 3339, UTC로 변환)
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(DateBound::Day(day));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|at| at.with_timezone(&Utc).naive_utc())
            })
            .map(DateBound::Instant)
    }
}

/// 바인딩 값이자 `active_filters`에 돌려주는 정규화된 표기
impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            DateBound::Instant(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// 요청 하나의 필터 파라미터 전체
///
/// 불변식: `page >= 1`, `1 <= limit <= 100`, `facet_limit > 0`.
/// `services::params::parse_filters`가 이 불변식을 보장한 값만 만들어냅니다.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub page: i64,
    pub limit: i64,
    pub sort: SortField,
    pub order: SortOrder,
    /// 카테고리 집합 (중복 제거, 처음 나온 순서 유지)
    pub categories: Vec<String>,
    /// 태그 목록. 결과는 여기 있는 태그를 **모두** 가져야 합니다 (AND).
    pub tags: Vec<String>,
    pub popularity_min: Option<f64>,
    pub popularity_max: Option<f64>,
    pub date_from: Option<DateBound>,
    /// 날짜만 주어지면 그날 23:59:59까지 포함합니다.
    pub date_to: Option<DateBound>,
    pub include_facets: bool,
    pub facet_limit: i64,
    /// 자유 텍스트 검색어. None이면 브라우즈 모드입니다.
    pub free_text_query: Option<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortField::default(),
            order: SortOrder::default(),
            categories: Vec::new(),
            tags: Vec::new(),
            popularity_min: None,
            popularity_max: None,
            date_from: None,
            date_to: None,
            include_facets: true,
            facet_limit: DEFAULT_FACET_LIMIT,
            free_text_query: None,
        }
    }
}

impl FilterParams {
    /// `LIMIT/OFFSET`의 OFFSET 값: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// 검색어 유무로 모드를 결정합니다. 공백뿐인 검색어는 브라우즈로 취급합니다.
    pub fn mode(&self) -> SearchMode {
        match self.free_text_query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => SearchMode::Search(q.to_string()),
            _ => SearchMode::Browse,
        }
    }
}

/// 요청 처리 모드
///
/// 두 모드는 같은 파이프라인(메인 쿼리 → 카운트 → 패싯)을 공유하고,
/// WHERE 절을 만드는 방식과 정렬만 다릅니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// 검색어 없음: 구조화된 필터만 사용, 사용자가 정렬 기준을 고를 수 있음
    Browse,
    /// 검색어 있음: BM25 전문검색 + 필터, 항상 관련도순
    Search(String),
}

/// 패싯 쿼리에서 잠시 빼 둘 필터
///
/// 카테고리 패싯을 계산할 때 카테고리 필터를 그대로 두면 이미 선택한 값만 보이므로,
/// 해당 필터 하나만 제외하고 나머지 필터는 유지합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetField {
    #[default]
    None,
    Categories,
    Tags,
    Popularity,
}
