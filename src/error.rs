use thiserror::Error;

/// 服务边界上的错误; 链接引擎本身不会失败
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Linking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
