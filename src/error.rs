//! 错误类型
//!
//! 控制器本身不会失败，这里只覆盖终端、配置和目录相关的错误

use thiserror::Error;

/// 统一的 Result 别名
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 终端或文件 I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件无法解析
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 配置值不合法
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// 无法定位用户目录
    #[error("cannot locate {0} directory")]
    MissingDir(&'static str),
}
