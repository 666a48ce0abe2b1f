//! 阵营与格子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, NUM_SQUARES};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 获取描述串字符
    pub fn to_config_char(&self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// 从描述串字符解析
    pub fn from_config_char(c: char) -> Option<Side> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }
}

/// 横向锁
///
/// 刚做过横向移动的格子被锁定方向，禁止下一步立刻反向横移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LateralLock {
    /// 未锁定
    #[default]
    None,
    /// 上一步向左横移
    Left,
    /// 上一步向右横移
    Right,
}

/// 格子内容：颜色与横向锁
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// 占据该格的阵营，空格为 None
    pub color: Option<Side>,
    /// 该格的横向锁
    pub lock: LateralLock,
}

/// 棋盘格
///
/// 线性索引 0..=24，从底行开始按行主序编号。
/// 行列和为偶数的格子带有斜线连接。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    /// 创建新格子
    pub fn new(index: u8) -> Option<Square> {
        if (index as usize) < NUM_SQUARES {
            Some(Square(index))
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(index: u8) -> Square {
        Square(index)
    }

    /// 从列字母（a-e）和行数字（1-5）解析
    pub fn from_col_row(col: char, row: char) -> Option<Square> {
        if !('a'..='e').contains(&col) || !('1'..='5').contains(&row) {
            return None;
        }
        let c = col as u8 - b'a';
        let r = row as u8 - b'1';
        Some(Square(r * BOARD_SIZE as u8 + c))
    }

    /// 转换为数组索引
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 行号（0-4，自底向上）
    pub fn row(self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    /// 列号（0-4，自左向右）
    pub fn col(self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// 列字母
    pub fn col_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// 行数字
    pub fn row_char(self) -> char {
        (b'1' + self.row()) as char
    }

    /// 该格是否带斜线连接（行列和为偶数）
    pub fn has_diagonals(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }

    /// 遍历所有格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.col_char(), self.row_char())
    }
}
