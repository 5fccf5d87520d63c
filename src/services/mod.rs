//! # 서비스 계층
//!
//! DB 계층 위에서 요청 처리 로직을 담당합니다.
//! - `params`: 쿼리 문자열 → 필터 모델
//! - `mapper`: DB 행 → 응답 엔티티
//! - `assembler`: 쿼리 실행과 응답 봉투 조립

pub mod assembler;
pub mod mapper;
pub mod params;
