//! # 쿼리 실행기(Query Executor)
//!
//! 완성된 `Statement`를 실제 데이터베이스에서 실행하는 인터페이스입니다.
//!
//! 응답 조립 로직(`services::assembler`)은 이 트레이트에만 의존합니다.
//! 운영에서는 `PgPool`이, 테스트에서는 메모리 안의 가짜 실행기가 이 트레이트를 구현합니다.
//!
//! ## 연결 관리
//! `PgPool`에 대해 `fetch_all(self)`처럼 풀을 직접 넘기면, sqlx가 쿼리 하나 동안만
//! 연결을 빌려 쓰고 끝나면(에러가 나도) 풀에 돌려줍니다. 트랜잭션은 쓰지 않습니다.

use async_trait::async_trait;
use sqlx::{postgres::PgArguments, Arguments, PgPool};

use super::sql::{SqlArg, Statement};
use crate::error::AppError;
use crate::models::{FacetRow, QuoteRow};

/// 파라미터화된 SQL을 실행하는 외부 협력자
///
/// 모든 실패(연결, 문법, 디코딩)는 구분 없이 `AppError::Database`로 올라옵니다.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// 명언 목록 쿼리 (`QuoteRow` 컬럼 목록을 프로젝션하는 문장)
    async fn fetch_quotes(&self, statement: &Statement) -> Result<Vec<QuoteRow>, AppError>;

    /// `SELECT COUNT(*)` 쿼리
    async fn fetch_count(&self, statement: &Statement) -> Result<i64, AppError>;

    /// `value, count` 두 컬럼을 돌려주는 패싯 집계 쿼리
    async fn fetch_facets(&self, statement: &Statement) -> Result<Vec<FacetRow>, AppError>;

    /// `MIN, MAX` 한 행을 돌려주는 쿼리
    async fn fetch_range(
        &self,
        statement: &Statement,
    ) -> Result<(Option<f64>, Option<f64>), AppError>;
}

#[async_trait]
impl QueryExecutor for PgPool {
    async fn fetch_quotes(&self, statement: &Statement) -> Result<Vec<QuoteRow>, AppError> {
        let rows = sqlx::query_as_with::<_, QuoteRow, _>(&statement.sql, arguments(statement)?)
            .fetch_all(self)
            .await?;
        Ok(rows)
    }

    async fn fetch_count(&self, statement: &Statement) -> Result<i64, AppError> {
        let count = sqlx::query_scalar_with::<_, i64, _>(&statement.sql, arguments(statement)?)
            .fetch_one(self)
            .await?;
        Ok(count)
    }

    async fn fetch_facets(&self, statement: &Statement) -> Result<Vec<FacetRow>, AppError> {
        let rows = sqlx::query_as_with::<_, FacetRow, _>(&statement.sql, arguments(statement)?)
            .fetch_all(self)
            .await?;
        Ok(rows)
    }

    async fn fetch_range(
        &self,
        statement: &Statement,
    ) -> Result<(Option<f64>, Option<f64>), AppError> {
        // 집계 함수는 행이 없어도 항상 한 행(NULL, NULL)을 돌려줍니다.
        let range = sqlx::query_as_with::<_, (Option<f64>, Option<f64>), _>(
            &statement.sql,
            arguments(statement)?,
        )
        .fetch_one(self)
        .await?;
        Ok(range)
    }
}

/// `SqlArg` 목록을 sqlx의 Postgres 인자 목록으로 옮깁니다.
///
/// 순서는 `Statement::render`가 만든 순서 그대로이므로 `$n`과 정확히 대응합니다.
fn arguments(statement: &Statement) -> Result<PgArguments, AppError> {
    let mut args = PgArguments::default();

    for arg in &statement.args {
        let added = match arg {
            SqlArg::Text(value) => args.add(value.clone()),
            SqlArg::Float(value) => args.add(*value),
            SqlArg::Int(value) => args.add(*value),
        };
        added.map_err(sqlx::Error::Encode)?;
    }

    Ok(args)
}
