use thiserror::Error;

/// gitsync 的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 同步目标缺少必要配置（未实现的访问器或空字段）
    #[error("{0}")]
    Configuration(String),

    /// git 以非零状态退出，消息为完整的合并输出
    #[error("{0}")]
    Sync(String),

    /// 无法启动 git 或读取其输出
    #[error("failed to execute git: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_implemented(accessor: &str) -> Self {
        Error::Configuration(format!("{}: not implemented", accessor))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
