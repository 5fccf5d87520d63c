//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 필터를 SQL로 번역하고 실행하는 모듈들입니다.
//!
//! 각 하위 모듈:
//! - `sql`: SQL 조각과 `$n` 번호 매기기
//! - `predicates`: 필터 → WHERE 조건 (브라우즈/검색)
//! - `statements`: 메인/카운트/패싯/단순검색 문장 조립
//! - `executor`: 문장 실행 인터페이스와 PostgreSQL 구현

pub mod executor;
pub mod predicates;
pub mod sql;
pub mod statements;

pub use executor::QueryExecutor;
