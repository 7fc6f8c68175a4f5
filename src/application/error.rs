//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到，消息形如 "Rule not found"
    #[error("{resource_type} not found")]
    NotFound { resource_type: &'static str, id: i64 },

    /// 仓储错误
    #[error("{0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RepositoryError;

    #[test]
    fn test_not_found_message_omits_id() {
        let err = ApplicationError::not_found("Game", 42);
        assert_eq!(err.to_string(), "Game not found");
    }

    #[test]
    fn test_repository_error_keeps_raw_message() {
        let err: ApplicationError =
            RepositoryError::ConstraintViolation("UNIQUE constraint failed".into()).into();
        assert_eq!(err.to_string(), "UNIQUE constraint failed");
    }
}
