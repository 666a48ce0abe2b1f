//! 走法历史记录
//!
//! 每步走法执行前先把将被改动的格子原值登记下来，
//! 悔棋时按登记原样恢复即可，无需重演整盘对局。

use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::piece::{Cell, Square};

/// 单步历史条目：走法本身与被改动格子的原值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    mv: Move,
    cells: Vec<(Square, Cell)>,
}

impl HistoryEntry {
    pub(crate) fn new(mv: Move) -> HistoryEntry {
        HistoryEntry {
            mv,
            cells: Vec::new(),
        }
    }

    /// 登记一个格子执行前的内容；同一格只保留最早的原值
    pub(crate) fn record(&mut self, sq: Square, cell: Cell) {
        if !self.cells.iter().any(|(s, _)| *s == sq) {
            self.cells.push((sq, cell));
        }
    }

    pub(crate) fn cells(&self) -> &[(Square, Cell)] {
        &self.cells
    }

    /// 该条目对应的走法
    pub fn mv(&self) -> &Move {
        &self.mv
    }
}

/// 历史栈
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> HistoryStack {
        HistoryStack::default()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// 已记录的步数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最近一步的历史条目
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}
