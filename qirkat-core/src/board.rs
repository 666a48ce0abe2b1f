//! 棋盘状态
//!
//! 25 个格子各自保存颜色与横向锁，外加当前走子方与终局标志。
//! 走法执行前登记被改动格子的原值，悔棋按登记恢复。

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{BOARD_SIZE, INITIAL_PIECES, NUM_SQUARES};
use crate::error::{QirkatError, Result};
use crate::history::{HistoryEntry, HistoryStack};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Cell, LateralLock, Side, Square};

/// 棋盘
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    squares: Vec<Cell>,
    whose_move: Side,
    game_over: bool,
    history: HistoryStack,
}

/// 局面相等只看格子内容与走子方，历史记录不参与比较
impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.squares == other.squares && self.whose_move == other.whose_move
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// 创建初始局面：白方在下先行，中心格留空
    pub fn new() -> Board {
        let mut board = Board {
            squares: vec![Cell::default(); NUM_SQUARES],
            whose_move: Side::White,
            game_over: false,
            history: HistoryStack::new(),
        };
        // 初始描述串是编译期常量，解析不会失败
        board
            .set_pieces(INITIAL_PIECES, Side::White)
            .expect("initial layout should be valid");
        board
    }

    /// 指定格子上的阵营，空格为 None
    pub fn get(&self, sq: Square) -> Option<Side> {
        self.squares[sq.index()].color
    }

    /// 指定格子的横向锁
    pub fn lock(&self, sq: Square) -> LateralLock {
        self.squares[sq.index()].lock
    }

    /// 全部格子的颜色布局，走法模拟用
    pub(crate) fn colors(&self) -> Vec<Option<Side>> {
        self.squares.iter().map(|c| c.color).collect()
    }

    /// 当前走子方
    pub fn whose_move(&self) -> Side {
        self.whose_move
    }

    /// 直接设置走子方，并重新判定终局
    pub fn set_whose_move(&mut self, side: Side) {
        self.whose_move = side;
        self.update_game_over();
    }

    /// 当前走子方是否已无合法走法
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// 指定阵营的棋子数
    pub fn count(&self, side: Side) -> u32 {
        self.squares
            .iter()
            .filter(|c| c.color == Some(side))
            .count() as u32
    }

    /// 双方棋子总数
    pub fn piece_count(&self) -> u32 {
        self.count(Side::White) + self.count(Side::Black)
    }

    /// 已走步数
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 按描述串重摆棋盘
    ///
    /// 描述串忽略空白后必须恰好 25 个 `w`/`b`/`-` 字符，
    /// 从底行开始按行主序排列。重摆会清空横向锁与历史记录。
    pub fn set_pieces(&mut self, config: &str, side: Side) -> Result<()> {
        let chars: Vec<char> = config.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != NUM_SQUARES {
            return Err(QirkatError::BadConfig {
                reason: format!("expected {} squares, got {}", NUM_SQUARES, chars.len()),
            });
        }
        let mut cells = Vec::with_capacity(NUM_SQUARES);
        for c in chars {
            let color = match c {
                '-' => None,
                _ => Some(Side::from_config_char(c).ok_or_else(|| QirkatError::BadConfig {
                    reason: format!("unexpected character '{c}'"),
                })?),
            };
            cells.push(Cell {
                color,
                lock: LateralLock::None,
            });
        }
        self.squares = cells;
        self.whose_move = side;
        self.history.clear();
        self.update_game_over();
        debug!(side = ?side, "board configured");
        Ok(())
    }

    /// 恢复初始局面
    pub fn clear(&mut self) {
        // 初始描述串是编译期常量，解析不会失败
        self.set_pieces(INITIAL_PIECES, Side::White)
            .expect("initial layout should be valid");
    }

    /// 当前局面的描述串（从底行开始按行主序）
    pub fn config_string(&self) -> String {
        self.squares
            .iter()
            .map(|c| match c.color {
                Some(side) => side.to_config_char(),
                None => '-',
            })
            .collect()
    }

    /// 文本棋盘，顶行在前；legend 为真时附带行号列标
    pub fn to_text(&self, legend: bool) -> String {
        let mut out = String::new();
        for row in (0..BOARD_SIZE).rev() {
            if legend {
                out.push((b'1' + row as u8) as char);
                out.push(' ');
            } else {
                out.push_str("  ");
            }
            for col in 0..BOARD_SIZE {
                if col > 0 {
                    out.push(' ');
                }
                let sq = Square::new_unchecked((row * BOARD_SIZE + col) as u8);
                out.push(match self.get(sq) {
                    Some(side) => side.to_config_char(),
                    None => '-',
                });
            }
            out.push('\n');
        }
        if legend {
            out.push_str("  a b c d e\n");
        }
        // 去掉末尾换行，便于与字面量比较
        out.pop();
        out
    }

    /// 判断走法是否合法
    pub fn legal_move(&self, mv: &Move) -> bool {
        MoveGenerator::legal_move(self, mv)
    }

    /// 枚举当前走子方的全部合法走法
    pub fn get_moves(&self) -> Vec<Move> {
        MoveGenerator::generate(self)
    }

    /// 执行走法并换边
    ///
    /// 调用方必须保证 mv 合法；执行前登记被改动格子以支持悔棋。
    pub fn make_move(&mut self, mv: &Move) {
        debug_assert!(self.legal_move(mv), "make_move called with illegal move");
        let mover = self.whose_move;
        let mut entry = HistoryEntry::new(mv.clone());
        match mv {
            Move::Step { from, to } => {
                entry.record(*from, self.squares[from.index()]);
                entry.record(*to, self.squares[to.index()]);
                self.squares[from.index()] = Cell::default();
                self.squares[to.index()] = Cell {
                    color: Some(mover),
                    lock: mv.lateral().unwrap_or(LateralLock::None),
                };
            }
            Move::Jump(steps) => {
                for step in steps {
                    entry.record(step.from, self.squares[step.from.index()]);
                    entry.record(step.over, self.squares[step.over.index()]);
                    entry.record(step.to, self.squares[step.to.index()]);
                }
                for step in steps {
                    self.squares[step.from.index()] = Cell::default();
                    self.squares[step.over.index()] = Cell::default();
                    self.squares[step.to.index()] = Cell {
                        color: Some(mover),
                        lock: LateralLock::None,
                    };
                }
            }
        }
        self.history.push(entry);
        self.whose_move = mover.opponent();
        self.update_game_over();
        trace!(mv = %mv, next = ?self.whose_move, "move made");
    }

    /// 悔棋一步；历史为空时什么都不做
    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };
        for &(sq, cell) in entry.cells() {
            self.squares[sq.index()] = cell;
        }
        self.whose_move = self.whose_move.opponent();
        self.update_game_over();
        trace!(mv = %entry.mv(), next = ?self.whose_move, "move undone");
    }

    /// 当前局面的只读视图
    pub fn view(&self) -> BoardView<'_> {
        BoardView { board: self }
    }

    /// 当前局面的独立副本，历史记录一并复制
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    fn update_game_over(&mut self) {
        self.game_over = MoveGenerator::generate(self).is_empty();
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text(false))
    }
}

/// 棋盘只读视图，借用期间局面不会变动
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
}

impl BoardView<'_> {
    pub fn get(&self, sq: Square) -> Option<Side> {
        self.board.get(sq)
    }

    pub fn whose_move(&self) -> Side {
        self.board.whose_move()
    }

    pub fn game_over(&self) -> bool {
        self.board.game_over()
    }

    pub fn history_len(&self) -> usize {
        self.board.history_len()
    }
}
