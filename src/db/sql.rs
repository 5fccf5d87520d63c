//! # SQL 조각(Fragment)과 완성된 문장(Statement)
//!
//! 동적으로 WHERE 절을 조립할 때 가장 흔한 버그는 `$n` 자리표시자 번호와
//! 바인딩 인자 순서가 어긋나는 것입니다. 이 모듈은 번호를 수동 카운터로 관리하지 않습니다.
//!
//! - `SqlFragment`는 "SQL 텍스트 조각"과 "인자" 조각을 순서대로 쌓기만 합니다.
//! - `Statement::render`가 조각을 한 번에 훑으며 `$1, $2, ...`를 붙이고,
//!   같은 순서로 인자 목록을 만듭니다.
//!
//! 그래서 텍스트상의 자리표시자 순서와 인자 순서는 구조적으로 항상 일치하고,
//! 번호가 건너뛰거나 재사용되는 일이 없습니다.
//! 사용자 입력은 절대 SQL 텍스트에 들어가지 않고 언제나 인자로만 전달됩니다.

/// 바인딩할 인자 값
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Float(f64),
    Int(i64),
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<&String> for SqlArg {
    fn from(value: &String) -> Self {
        SqlArg::Text(value.clone())
    }
}

impl From<f64> for SqlArg {
    fn from(value: f64) -> Self {
        SqlArg::Float(value)
    }
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Int(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Sql(String),
    Arg(SqlArg),
}

/// 번호가 아직 붙지 않은 SQL 조각
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pieces: Vec<Piece>,
}

impl SqlFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// SQL 텍스트로 시작하는 조각을 만듭니다.
    pub fn sql(text: impl Into<String>) -> Self {
        let mut fragment = Self::new();
        fragment.push_sql(text);
        fragment
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// SQL 텍스트를 덧붙입니다. 사용자 입력을 여기에 넣으면 안 됩니다.
    pub fn push_sql(&mut self, text: impl Into<String>) -> &mut Self {
        self.pieces.push(Piece::Sql(text.into()));
        self
    }

    /// 인자 하나를 덧붙입니다. 렌더링 시 `$n` 자리표시자가 됩니다.
    pub fn push_arg(&mut self, arg: impl Into<SqlArg>) -> &mut Self {
        self.pieces.push(Piece::Arg(arg.into()));
        self
    }

    /// 인자 여러 개를 `$a,$b,$c` 형태의 쉼표 목록으로 덧붙입니다.
    pub fn push_arg_list<I, A>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<SqlArg>,
    {
        for (i, arg) in args.into_iter().enumerate() {
            if i > 0 {
                self.push_sql(",");
            }
            self.push_arg(arg);
        }
        self
    }

    /// 다른 조각을 뒤에 이어 붙입니다.
    pub fn append(&mut self, other: SqlFragment) -> &mut Self {
        self.pieces.extend(other.pieces);
        self
    }

    /// 조각들을 구분자로 이어 붙입니다. 빈 목록이면 빈 조각입니다.
    pub fn join(fragments: impl IntoIterator<Item = SqlFragment>, separator: &str) -> SqlFragment {
        let mut joined = SqlFragment::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.push_sql(separator);
            }
            joined.append(fragment);
        }
        joined
    }
}

/// 실행 가능한 완성 문장: `$n` 자리표시자가 붙은 SQL과 순서대로 정렬된 인자
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl Statement {
    /// 조각을 훑으며 자리표시자 번호를 1부터 차례로 붙입니다.
    ///
    /// 번호를 매기는 곳은 프로젝트 전체에서 이 함수 하나뿐입니다.
    pub fn render(fragment: SqlFragment) -> Self {
        let mut sql = String::new();
        let mut args = Vec::new();

        for piece in fragment.pieces {
            match piece {
                Piece::Sql(text) => sql.push_str(&text),
                Piece::Arg(arg) => {
                    args.push(arg);
                    sql.push('$');
                    sql.push_str(&args.len().to_string());
                }
            }
        }

        Self { sql, args }
    }
}
