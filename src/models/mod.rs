//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `filter`: 요청의 필터 파라미터와 검색 모드
//! - `quote`: DB 행과 명언 엔티티
//! - `response`: 페이지네이션, 패싯, 응답 봉투
//!
//! 예: `crate::models::filter::FilterParams` 대신 `crate::models::FilterParams`로 접근 가능

pub mod filter;
pub mod quote;
pub mod response;

pub use filter::*;
pub use quote::*;
pub use response::*;
