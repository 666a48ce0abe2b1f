//! Qirkat AI 引擎
//!
//! 包含:
//! - 子力评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 按难度分级的搜索深度

mod evaluate;
mod search;

pub use evaluate::Evaluator;
pub use search::{AiConfig, AiEngine, Difficulty};
