//! 邻接模型
//!
//! 每个格子的相邻格与跳吃落点只取决于格子的奇偶性和边界，
//! 进程启动后计算一次并缓存。带斜线的格子（偶数索引）最多
//! 有 8 个相邻格，其余格子只有 4 个正交相邻格。

use std::sync::OnceLock;

use crate::constants::{MAX_INDEX, NUM_SQUARES};
use crate::piece::Square;

/// 相邻格与跳吃落点表
#[derive(Debug)]
pub struct Adjacency {
    neighbors: Vec<Vec<Square>>,
    jumps: Vec<Vec<Square>>,
}

impl Adjacency {
    /// 进程内共享的邻接表
    pub fn global() -> &'static Adjacency {
        static TABLE: OnceLock<Adjacency> = OnceLock::new();
        TABLE.get_or_init(Adjacency::build)
    }

    /// 指定格子的相邻格
    pub fn neighbors(sq: Square) -> &'static [Square] {
        &Adjacency::global().neighbors[sq.index()]
    }

    /// 指定格子的跳吃落点
    pub fn jump_targets(sq: Square) -> &'static [Square] {
        &Adjacency::global().jumps[sq.index()]
    }

    /// 跳吃段被跳过的格子（两端的中点）
    pub fn jumped_over(from: Square, to: Square) -> Square {
        Square::new_unchecked(((from.index() + to.index()) / 2) as u8)
    }

    fn build() -> Adjacency {
        let mut neighbors = Vec::with_capacity(NUM_SQUARES);
        let mut jumps = Vec::with_capacity(NUM_SQUARES);
        for i in 0..NUM_SQUARES as i32 {
            neighbors.push(Self::neighbors_of(i));
            jumps.push(Self::jumps_of(i));
        }
        Adjacency { neighbors, jumps }
    }

    /// 相邻格列表；偶数索引的格子附带四个斜线方向
    fn neighbors_of(i: i32) -> Vec<Square> {
        let (row, col) = (i / 5, i % 5);
        let mut out = Vec::new();
        if i % 2 == 0 {
            if row < 4 {
                out.push(i + 5);
                if col < 4 {
                    out.push(i + 6);
                }
                if col > 0 {
                    out.push(i + 4);
                }
            }
            if col < 4 {
                out.push(i + 1);
                if row > 0 {
                    out.push(i - 4);
                }
            }
            if col > 0 {
                out.push(i - 1);
                if row > 0 {
                    out.push(i - 6);
                }
            }
            if row > 0 {
                out.push(i - 5);
            }
        } else {
            if row < 4 {
                out.push(i + 5);
            }
            if col < 4 {
                out.push(i + 1);
            }
            if col > 0 {
                out.push(i - 1);
            }
            if row > 0 {
                out.push(i - 5);
            }
        }
        out.into_iter()
            .map(|n| Square::new_unchecked(n as u8))
            .collect()
    }

    /// 跳吃落点列表：与相邻格相同的方向结构，距离加倍，
    /// 生成后过滤掉越界索引
    fn jumps_of(i: i32) -> Vec<Square> {
        let (row, col) = (i / 5, i % 5);
        let mut out = Vec::new();
        if i % 2 == 0 {
            if row <= 2 {
                out.push(i + 10);
                if col <= 2 {
                    out.push(i + 12);
                }
                if col >= 2 {
                    out.push(i + 8);
                }
            }
            if col <= 2 {
                out.push(i + 2);
                if row >= 2 {
                    out.push(i - 8);
                }
            }
            if col >= 2 {
                out.push(i - 2);
                if row >= 2 {
                    out.push(i - 12);
                }
            }
            if row >= 2 {
                out.push(i - 10);
            }
        } else {
            if row <= 2 {
                out.push(i + 10);
            }
            if col <= 2 {
                out.push(i + 2);
            }
            if col >= 2 {
                out.push(i - 2);
            }
            if row >= 2 {
                out.push(i - 10);
            }
        }
        out.into_iter()
            .filter(|&n| (0..=MAX_INDEX as i32).contains(&n))
            .map(|n| Square::new_unchecked(n as u8))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(list: &[Square]) -> Vec<usize> {
        list.iter().map(|s| s.index()).collect()
    }

    #[test]
    fn test_neighbor_lists() {
        // 角落、边缘与中心的参考列表
        assert_eq!(indices(Adjacency::neighbors(Square::new_unchecked(0))), vec![5, 6, 1]);
        assert_eq!(indices(Adjacency::neighbors(Square::new_unchecked(4))), vec![9, 8, 3]);
        assert_eq!(
            indices(Adjacency::neighbors(Square::new_unchecked(12))),
            vec![17, 18, 16, 13, 8, 11, 6, 7]
        );
        assert_eq!(indices(Adjacency::neighbors(Square::new_unchecked(15))), vec![20, 16, 10]);
        assert_eq!(indices(Adjacency::neighbors(Square::new_unchecked(20))), vec![21, 16, 15]);
    }

    #[test]
    fn test_odd_squares_have_no_diagonals() {
        for sq in Square::all().filter(|s| s.index() % 2 == 1) {
            let list = Adjacency::neighbors(sq);
            assert!(list.len() <= 4);
            for &n in list {
                // 奇数格的相邻格只能同行或同列
                assert!(n.row() == sq.row() || n.col() == sq.col());
            }
        }
    }

    #[test]
    fn test_jump_lists() {
        assert_eq!(indices(Adjacency::jump_targets(Square::new_unchecked(0))), vec![10, 12, 2]);
        assert_eq!(indices(Adjacency::jump_targets(Square::new_unchecked(1))), vec![11, 3]);
        assert_eq!(
            indices(Adjacency::jump_targets(Square::new_unchecked(12))),
            vec![22, 24, 20, 14, 4, 10, 0, 2]
        );
        assert_eq!(indices(Adjacency::jump_targets(Square::new_unchecked(10))), vec![20, 22, 12, 2, 0]);
    }

    #[test]
    fn test_jump_lists_in_range() {
        // 越界候选在生成阶段就被过滤，列表里不出现
        for sq in Square::all() {
            for &t in Adjacency::jump_targets(sq) {
                assert!(t.index() < NUM_SQUARES);
            }
        }
    }

    #[test]
    fn test_jumped_over_is_midpoint() {
        let from = Square::new_unchecked(10);
        let to = Square::new_unchecked(22);
        assert_eq!(Adjacency::jumped_over(from, to).index(), 16);

        let from = Square::new_unchecked(2);
        let to = Square::new_unchecked(12);
        assert_eq!(Adjacency::jumped_over(from, to).index(), 7);
    }
}
