use thiserror::Error;

use crate::db::repository::RepoError;

/// 服务器启动/运行错误
///
/// 请求级错误使用 [`storefront_shared::AppError`]; 此类型只覆盖会终止进程的错误。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("存储初始化失败: {0}")]
    Storage(#[from] RepoError),

    #[error("端口绑定失败 {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
