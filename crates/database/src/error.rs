use thiserror::Error;

/// 数据库操作错误类型
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 迁移错误
    #[error("数据库迁移错误: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建迁移错误
    pub fn migration<T: ToString>(msg: T) -> Self {
        Self::MigrationError(msg.to_string())
    }

    /// 是否违反了唯一约束（PostgreSQL 23505）
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::SqlxError(sqlx::Error::Database(e)) if e.is_unique_violation())
    }

    /// 是否违反了外键约束（PostgreSQL 23503）
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::SqlxError(sqlx::Error::Database(e)) if e.is_foreign_key_violation())
    }

    /// 是否违反了排他约束（PostgreSQL 23P01），即 `leaves_no_overlap`
    pub fn is_exclusion_violation(&self) -> bool {
        matches!(
            self,
            Self::SqlxError(sqlx::Error::Database(e)) if e.code().as_deref() == Some(EXCLUSION_VIOLATION)
        )
    }
}

/// PostgreSQL 排他约束冲突的 SQLSTATE
pub const EXCLUSION_VIOLATION: &str = "23P01";

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::ErrorKind;
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    struct PgError(&'static str);

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl std::error::Error for PgError {}

    impl sqlx::error::DatabaseError for PgError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> DatabaseError {
        DatabaseError::SqlxError(sqlx::Error::Database(Box::new(PgError(code))))
    }

    #[test]
    fn exclusion_violation_is_recognised_by_sqlstate() {
        assert!(db_error(EXCLUSION_VIOLATION).is_exclusion_violation());
        assert!(!db_error("23505").is_exclusion_violation());
        assert!(!DatabaseError::connection("refused").is_exclusion_violation());
    }
}
