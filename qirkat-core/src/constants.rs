//! 规则常量定义

/// 棋盘边长（5×5 交叉点）
pub const BOARD_SIZE: usize = 5;

/// 格子总数
pub const NUM_SQUARES: usize = 25;

/// 最大线性索引
pub const MAX_INDEX: u8 = 24;

/// 初始局面描述串
///
/// 按行主序给出，从底行（第 1 行）开始，行内从 a 列到 e 列。
/// 白方在下，黑方在上，中心格留空。
pub const INITIAL_PIECES: &str =
    "  w w w w w\n  w w w w w\n  b b - w w\n  b b b b b\n  b b b b b";
