//! # 응답 모델 정의
//!
//! 검색/브라우즈 API가 돌려주는 JSON 봉투(envelope)의 구조체들입니다.
//! 모두 요청마다 새로 만들어지고, 응답을 보낸 뒤 버려집니다.

use serde::Serialize;

use super::{FilterParams, Quote};

/// 페이지네이션 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// `(page, limit, total_count)`로 페이지네이션을 계산합니다.
    ///
    /// `total_pages`는 올림 나눗셈입니다. 결과가 0건이면 `total_pages`도 0이고
    /// `has_next`는 false가 됩니다.
    pub fn new(page: i64, limit: i64, total_count: i64) -> Self {
        // limit은 FilterParams 불변식상 1 이상이지만, 0으로 나누는 일은 여기서도 막아 둡니다.
        let limit = limit.max(1);
        let total_pages = (total_count + limit - 1) / limit;

        Self {
            page,
            limit,
            total_pages,
            total_count,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// 패싯 값 하나와 그 값을 가진 결과 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetItem {
    pub value: String,
    pub count: i64,
}

/// 인기도(popularity) 최솟값/최댓값
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityRange {
    pub min: f64,
    pub max: f64,
}

/// 패싯 블록
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub categories: Vec<FacetItem>,
    pub tags: Vec<FacetItem>,
    /// 인기도 값이 있는 행이 하나도 없으면 `{min:0,max:0}`이 아니라 필드 자체가 빠집니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity_range: Option<PopularityRange>,
}

/// 실제로 적용된 구조화 필터의 메아리(echo)
///
/// 클라이언트가 "현재 적용 중인 필터" 칩을 그릴 때 사용합니다.
/// DB에 묻지 않고 `FilterParams`에서 바로 만듭니다.
/// 날짜는 입력 문자열이 아니라 실제로 비교에 쓰인 UTC 기준 값으로 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActiveFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl From<&FilterParams> for ActiveFilters {
    fn from(filters: &FilterParams) -> Self {
        Self {
            categories: filters.categories.clone(),
            tags: filters.tags.clone(),
            popularity_min: filters.popularity_min,
            popularity_max: filters.popularity_max,
            date_from: filters.date_from.map(|d| d.to_string()),
            date_to: filters.date_to.map(|d| d.to_string()),
        }
    }
}

/// `/api/search`의 응답 봉투 (브라우즈/검색 공용)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseResponse {
    pub quotes: Vec<Quote>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
    pub active_filters: ActiveFilters,
    /// 검색 모드에서만 채워지는 검색어
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// `/api/search/simple`(레거시 단순 검색)의 응답
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Quote>,
    pub count: usize,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateBound;

    #[test]
    fn pagination_uses_ceiling_division() {
        let p = Pagination::new(1, 20, 41);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(3, 20, 41);
        assert!(!p.has_next);
        assert!(p.has_prev);

        let p = Pagination::new(2, 20, 40);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn pagination_properties_hold_over_a_grid() {
        for limit in [1, 7, 20, 100] {
            for total in [0, 1, 19, 20, 21, 99, 100, 101, 1000] {
                for page in [1, 2, 5, 50] {
                    let p = Pagination::new(page, limit, total);
                    let expected = (total as f64 / limit as f64).ceil() as i64;
                    assert_eq!(p.total_pages, expected);
                    assert_eq!(p.has_next, page < p.total_pages);
                    assert_eq!(p.has_prev, page > 1);
                }
            }
        }
    }

    #[test]
    fn active_filters_omit_unset_members() {
        let filters = FilterParams {
            tags: vec!["wisdom".into()],
            popularity_min: Some(5.0),
            ..FilterParams::default()
        };
        let json = serde_json::to_value(ActiveFilters::from(&filters)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tags": ["wisdom"], "popularity_min": 5.0 })
        );
    }

    #[test]
    fn active_filters_echo_dates_in_utc() {
        let filters = FilterParams {
            date_from: DateBound::parse("2024-01-01"),
            date_to: DateBound::parse("2024-12-31T23:59:59+09:00"),
            ..FilterParams::default()
        };
        let active = ActiveFilters::from(&filters);
        assert_eq!(active.date_from.as_deref(), Some("2024-01-01"));
        assert_eq!(active.date_to.as_deref(), Some("2024-12-31T14:59:59"));
    }

    #[test]
    fn missing_popularity_range_is_omitted() {
        let facets = Facets {
            categories: vec![],
            tags: vec![],
            popularity_range: None,
        };
        let json = serde_json::to_value(&facets).unwrap();
        assert!(json.get("popularity_range").is_none());
        assert_eq!(json["categories"], serde_json::json!([]));
    }
}
