//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，在同一棋盘副本上
//! 走子与悔棋交替推进，避免逐节点克隆。

use qirkat_core::{Board, Move, Side};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::Evaluator;

/// 评估值上界，搜索窗口取其正负
const INFTY: i32 = i32::MAX;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                max_depth: 3,
            },
            Difficulty::Medium => Self {
                difficulty,
                max_depth: 5,
            },
            Difficulty::Hard => Self {
                difficulty,
                max_depth: 7,
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
    last_value: i32,
    last_found_move: Option<Move>,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
            last_value: 0,
            last_found_move: None,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 上一次搜索的根评估值
    pub fn last_value(&self) -> i32 {
        self.last_value
    }

    /// 搜索最佳走法；终局或搜索深度为零时返回 None
    pub fn find_move(&mut self, board: &Board) -> Option<Move> {
        self.nodes_searched = 0;
        self.last_found_move = None;
        if board.game_over() {
            return None;
        }

        // 简单难度有三成概率直接走随机合法走法
        if self.config.difficulty == Difficulty::Easy && rand::random::<f32>() < 0.3 {
            let moves = board.get_moves();
            let mut rng = rand::thread_rng();
            self.last_found_move = moves.choose(&mut rng).cloned();
            self.last_value = Evaluator::material(board);
            return self.last_found_move.clone();
        }

        let sense = match board.whose_move() {
            Side::White => 1,
            Side::Black => -1,
        };
        let mut work = board.snapshot();
        self.last_value =
            self.alpha_beta(&mut work, self.config.max_depth, true, sense, -INFTY, INFTY);
        debug!(
            nodes = self.nodes_searched,
            value = self.last_value,
            mv = ?self.last_found_move.as_ref().map(Move::to_string),
            "search finished"
        );
        self.last_found_move.clone()
    }

    /// Alpha-Beta 搜索
    ///
    /// sense 为 +1 时取极大（白方），-1 时取极小（黑方）。
    /// 同值走法保留最后遇到的一个；save_move 只在根节点为真。
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        save_move: bool,
        sense: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;
        if depth == 0 || board.game_over() {
            return Evaluator::material(board);
        }

        let moves = board.get_moves();
        debug_assert!(moves
            .iter()
            .all(|m| board.get(m.from()) == Some(board.whose_move())));

        let mut best: Option<Move> = None;
        let mut value = if sense > 0 { -INFTY } else { INFTY };
        for mv in &moves {
            board.make_move(mv);
            let score = self.alpha_beta(board, depth - 1, false, -sense, alpha, beta);
            board.undo();
            if sense > 0 {
                value = value.max(score);
                alpha = alpha.max(value);
                if score == value {
                    best = Some(mv.clone());
                }
            } else {
                value = value.min(score);
                beta = beta.min(value);
                if score == value {
                    best = Some(mv.clone());
                }
            }
            if beta <= alpha {
                break;
            }
        }
        if save_move {
            self.last_found_move = best;
        }
        value
    }
}
