//! # 쿼리 파라미터 파서
//!
//! URL 쿼리 문자열의 `(키, 값)` 쌍 목록을 `FilterParams`로 바꿉니다.
//!
//! ## 관대한 파싱 정책
//! 잘못되었거나 범위를 벗어난 값은 에러로 거절하지 않고 **조용히 기본값으로 대체**합니다.
//! - `page`: 1 이상 정수, 아니면 1
//! - `limit`: 1~100 정수, 아니면 20
//! - `facet_limit`: 1 이상 정수, 아니면 10
//! - `sort` / `order`: 알 수 없으면 popularity / desc
//! - `popularity_min` / `popularity_max`: 유한한 실수, 아니면 필터 없음
//! - `date_from` / `date_to`: 날짜로 해석되지 않으면 필터 없음.
//!   `+09:00` 같은 시간대는 UTC로 바꾸고, 날짜만 준 `date_to`는 그날 끝까지 포함합니다.
//! - `facets`: true/false, 1/0, yes/no, on/off 중 하나, 아니면 true
//!
//! 배열 파라미터는 `categories[]=a&categories[]=b`처럼 같은 키를 반복해 보냅니다.
//! 대괄호 없는 `categories=a`도 받아들입니다.

use crate::models::{
    DateBound, FilterParams, SortField, SortOrder, DEFAULT_FACET_LIMIT, DEFAULT_LIMIT,
    DEFAULT_PAGE, MAX_LIMIT,
};

/// `(키, 값)` 쌍 목록을 필터 모델로 변환합니다. 실패하지 않습니다.
///
/// 같은 키가 여러 번 나오면 스칼라 값은 마지막 값이, 배열 값은 전부 누적됩니다.
pub fn parse_filters(pairs: &[(String, String)]) -> FilterParams {
    let mut filters = FilterParams::default();

    for (key, value) in pairs {
        let value = value.trim();

        match key.as_str() {
            "q" => {
                filters.free_text_query = Some(value.to_string()).filter(|q| !q.is_empty());
            }
            "page" => filters.page = parse_in_range(value, 1, i64::MAX, DEFAULT_PAGE),
            "limit" => filters.limit = parse_in_range(value, 1, MAX_LIMIT, DEFAULT_LIMIT),
            "sort" => filters.sort = SortField::parse(value),
            "order" => filters.order = SortOrder::parse(value),
            "categories[]" | "categories" => push_unique(&mut filters.categories, value),
            "tags[]" | "tags" => push_unique(&mut filters.tags, value),
            "popularity_min" => filters.popularity_min = parse_finite(value),
            "popularity_max" => filters.popularity_max = parse_finite(value),
            "date_from" => filters.date_from = DateBound::parse(value),
            "date_to" => filters.date_to = DateBound::parse(value),
            "facets" => filters.include_facets = parse_bool(value).unwrap_or(true),
            "facet_limit" => {
                filters.facet_limit = parse_in_range(value, 1, i64::MAX, DEFAULT_FACET_LIMIT)
            }
            other => tracing::trace!(key = other, "ignoring unknown query parameter"),
        }
    }

    filters
}

/// 빈 값과 중복 값은 건너뛰고, 처음 나온 순서는 유지합니다.
fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn parse_in_range(raw: &str, min: i64, max: i64, default: i64) -> i64 {
    match raw.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => n,
        _ => default,
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchMode;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_parameters_gives_defaults() {
        let filters = parse_filters(&[]);
        assert_eq!(filters, FilterParams::default());
        assert_eq!(filters.mode(), SearchMode::Browse);
    }

    #[test]
    fn empty_q_is_browse() {
        let filters = parse_filters(&pairs(&[("q", "   ")]));
        assert_eq!(filters.free_text_query, None);
        assert_eq!(filters.mode(), SearchMode::Browse);
    }

    #[test]
    fn q_is_trimmed() {
        let filters = parse_filters(&pairs(&[("q", "  life ")]));
        assert_eq!(filters.mode(), SearchMode::Search("life".into()));
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let filters = parse_filters(&pairs(&[
            ("page", "0"),
            ("limit", "500"),
            ("facet_limit", "-3"),
            ("popularity_min", "abc"),
            ("popularity_max", "NaN"),
        ]));
        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, 20);
        assert_eq!(filters.facet_limit, 10);
        assert_eq!(filters.popularity_min, None);
        assert_eq!(filters.popularity_max, None);
    }

    #[test]
    fn valid_numbers_are_kept() {
        let filters = parse_filters(&pairs(&[
            ("page", "4"),
            ("limit", "100"),
            ("facet_limit", "25"),
            ("popularity_min", "5"),
            ("popularity_max", "9.5"),
        ]));
        assert_eq!(filters.page, 4);
        assert_eq!(filters.limit, 100);
        assert_eq!(filters.facet_limit, 25);
        assert_eq!(filters.popularity_min, Some(5.0));
        assert_eq!(filters.popularity_max, Some(9.5));
    }

    #[test]
    fn unknown_sort_and_order_fall_back() {
        let filters = parse_filters(&pairs(&[("sort", "bogus"), ("order", "sideways")]));
        assert_eq!(filters.sort, SortField::Popularity);
        assert_eq!(filters.order, SortOrder::Desc);
    }

    #[test]
    fn repeated_array_keys_accumulate() {
        let filters = parse_filters(&pairs(&[
            ("tags[]", "wisdom"),
            ("tags[]", "growth"),
            ("tags[]", "wisdom"),
            ("tags", ""),
            ("categories[]", "life"),
            ("categories", "love"),
        ]));
        assert_eq!(filters.tags, vec!["wisdom", "growth"]);
        assert_eq!(filters.categories, vec!["life", "love"]);
    }

    #[test]
    fn dates_must_parse() {
        let filters = parse_filters(&pairs(&[
            ("date_from", "2024-01-01"),
            ("date_to", "not-a-date"),
        ]));
        assert_eq!(filters.date_from, DateBound::parse("2024-01-01"));
        assert!(filters.date_from.is_some());
        assert_eq!(filters.date_to, None);
    }

    #[test]
    fn offset_date_bounds_are_normalized_to_utc() {
        let filters = parse_filters(&pairs(&[
            ("date_from", "2024-01-01T08:30:00"),
            ("date_to", "2024-12-31T23:59:59+09:00"),
        ]));
        assert_eq!(
            filters.date_from.map(|d| d.to_string()).as_deref(),
            Some("2024-01-01T08:30:00")
        );
        assert_eq!(
            filters.date_to.map(|d| d.to_string()).as_deref(),
            Some("2024-12-31T14:59:59")
        );
    }

    #[test]
    fn facets_flag() {
        assert!(!parse_filters(&pairs(&[("facets", "false")])).include_facets);
        assert!(!parse_filters(&pairs(&[("facets", "0")])).include_facets);
        assert!(parse_filters(&pairs(&[("facets", "maybe")])).include_facets);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let filters = parse_filters(&pairs(&[("utm_source", "newsletter")]));
        assert_eq!(filters, FilterParams::default());
    }
}
