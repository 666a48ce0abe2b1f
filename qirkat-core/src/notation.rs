//! 走法记号解析
//!
//! 走法写作以 `-` 连接的格子序列，如 `c2-c3` 或 `a3-c5-c3`。
//! 两个格子时按相邻关系判断是单步还是跳吃；三个及以上只能是跳吃链。

use crate::adjacency::Adjacency;
use crate::error::{QirkatError, Result};
use crate::moves::{JumpStep, Move};
use crate::piece::Square;

/// 记号解析器
pub struct Notation;

impl Notation {
    /// 解析单个格子坐标，如 `c2`
    pub fn parse_square(text: &str) -> Result<Square> {
        let mut chars = text.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(col), Some(row), None) => {
                Square::from_col_row(col, row).ok_or_else(|| QirkatError::BadSquare {
                    text: text.to_string(),
                })
            }
            _ => Err(QirkatError::BadSquare {
                text: text.to_string(),
            }),
        }
    }

    /// 解析走法记号
    ///
    /// 只校验记号形状（格子合法、相邻或跳吃距离），
    /// 不校验在某个具体局面下是否可走。
    pub fn parse_move(text: &str) -> Result<Move> {
        let bad = || QirkatError::BadMove {
            notation: text.to_string(),
        };
        let squares = text
            .split('-')
            .map(Self::parse_square)
            .collect::<Result<Vec<Square>>>()
            .map_err(|_| bad())?;
        match squares.len() {
            0 | 1 => Err(bad()),
            2 => {
                let (from, to) = (squares[0], squares[1]);
                if Adjacency::neighbors(from).contains(&to) {
                    Ok(Move::step(from, to))
                } else if Adjacency::jump_targets(from).contains(&to) {
                    Ok(Move::jump(vec![JumpStep::new(from, to)]))
                } else {
                    Err(bad())
                }
            }
            _ => {
                let mut steps = Vec::with_capacity(squares.len() - 1);
                for pair in squares.windows(2) {
                    if !Adjacency::jump_targets(pair[0]).contains(&pair[1]) {
                        return Err(bad());
                    }
                    steps.push(JumpStep::new(pair[0], pair[1]));
                }
                Ok(Move::jump(steps))
            }
        }
    }
}
