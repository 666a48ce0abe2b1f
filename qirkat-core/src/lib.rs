//! Qirkat 规则库
//!
//! 包含:
//! - 格子、阵营、棋盘等核心数据结构
//! - 奇偶邻接模型（斜线格与跳吃落点）
//! - 走法生成和规则验证（强制吃子、最长连跳、横向锁）
//! - 走法历史与悔棋
//! - 走法记号解析

mod adjacency;
mod board;
mod constants;
mod error;
mod history;
mod moves;
mod notation;
mod piece;

pub use adjacency::Adjacency;
pub use board::{Board, BoardView};
pub use constants::*;
pub use error::{QirkatError, Result};
pub use history::{HistoryEntry, HistoryStack};
pub use moves::{JumpStep, Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Cell, LateralLock, Side, Square};
