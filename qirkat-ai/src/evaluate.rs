//! 棋局评估函数

use qirkat_core::{Board, Side};

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 子力评估：白子数减黑子数
    ///
    /// 白方分值越大越好，黑方分值越小越好。
    pub fn material(board: &Board) -> i32 {
        board.count(Side::White) as i32 - board.count(Side::Black) as i32
    }
}
