//! 错误类型定义

use thiserror::Error;

/// Qirkat 规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QirkatError {
    /// 无效的局面描述串
    #[error("bad board description: {reason}")]
    BadConfig { reason: String },

    /// 无效的走法记号
    #[error("bad move notation: {notation}")]
    BadMove { notation: String },

    /// 无效的格子坐标
    #[error("bad square: {text}")]
    BadSquare { text: String },
}

/// 规则库操作结果类型
pub type Result<T> = std::result::Result<T, QirkatError>;
