//! 错误类型定义

use thiserror::Error;

/// 存储与持久化错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("持久化失败: {0}")]
    Persist(String),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        StoreError::Persist(err.error.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 应用层结果类型：所有变更操作在持久化失败时返回该错误
pub type AppResult<T> = Result<T, StoreError>;
