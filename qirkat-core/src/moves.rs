//! 走法表示、合法性判定与枚举
//!
//! 核心规则在这里实现：
//! - 单步只能沿相邻格走到空格，不许后退，横移受横向锁约束
//! - 只要当前走子方存在跳吃，单步全部非法（强制吃子）
//! - 跳吃链必须走到无法延伸为止（最长连跳）

use serde::{Deserialize, Serialize};

use crate::adjacency::Adjacency;
use crate::board::Board;
use crate::piece::{LateralLock, Side, Square};

/// 跳吃段：起点、被跳过的格子、落点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JumpStep {
    pub from: Square,
    pub over: Square,
    pub to: Square,
}

impl JumpStep {
    /// 由起点与落点构造，被跳格取两者中点
    pub fn new(from: Square, to: Square) -> JumpStep {
        JumpStep {
            from,
            over: Adjacency::jumped_over(from, to),
            to,
        }
    }
}

/// 走法：单步平移或跳吃链
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// 单步（非吃子）
    Step { from: Square, to: Square },
    /// 跳吃链，至少一段；前一段的落点是后一段的起点
    Jump(Vec<JumpStep>),
}

impl Move {
    /// 创建单步走法
    pub fn step(from: Square, to: Square) -> Move {
        Move::Step { from, to }
    }

    /// 创建跳吃链走法
    pub fn jump(steps: Vec<JumpStep>) -> Move {
        debug_assert!(!steps.is_empty(), "jump chain must have at least one step");
        Move::Jump(steps)
    }

    /// 是否为跳吃
    pub fn is_jump(&self) -> bool {
        matches!(self, Move::Jump(_))
    }

    /// 起点
    pub fn from(&self) -> Square {
        match self {
            Move::Step { from, .. } => *from,
            Move::Jump(steps) => steps[0].from,
        }
    }

    /// 最终落点
    pub fn to(&self) -> Square {
        match self {
            Move::Step { to, .. } => *to,
            Move::Jump(steps) => steps[steps.len() - 1].to,
        }
    }

    /// 纯横移的方向；非横移（含斜走与跳吃）为 None
    pub fn lateral(&self) -> Option<LateralLock> {
        match self {
            Move::Step { from, to } => lateral_of(*from, *to),
            Move::Jump(_) => None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Step { from, to } => write!(f, "{}-{}", from, to),
            Move::Jump(steps) => {
                if let Some(first) = steps.first() {
                    write!(f, "{}", first.from)?;
                }
                for step in steps {
                    write!(f, "-{}", step.to)?;
                }
                Ok(())
            }
        }
    }
}

/// 同行横移的方向
fn lateral_of(from: Square, to: Square) -> Option<LateralLock> {
    if from.row() != to.row() {
        return None;
    }
    if to.col() == from.col() + 1 {
        Some(LateralLock::Right)
    } else if from.col() == to.col() + 1 {
        Some(LateralLock::Left)
    } else {
        None
    }
}

/// 走法生成与合法性判定
pub struct MoveGenerator;

impl MoveGenerator {
    /// 判断 mv 是否是当前走子方的合法走法；只返回判定，从不报错
    pub fn legal_move(board: &Board, mv: &Move) -> bool {
        match mv {
            Move::Step { from, to } => Self::legal_step(board, *from, *to),
            Move::Jump(steps) => {
                steps
                    .first()
                    .map(|s| board.get(s.from) == Some(board.whose_move()))
                    .unwrap_or(false)
                    && Self::valid_jump_chain(board, steps, true)
            }
        }
    }

    /// 校验跳吃链；allow_partial 时接受可以继续延伸的合法前缀
    pub fn check_jump(board: &Board, mv: &Move, allow_partial: bool) -> bool {
        let Move::Jump(steps) = mv else {
            return false;
        };
        if allow_partial {
            Self::valid_jump_chain(board, steps, false)
        } else {
            Self::legal_move(board, mv)
        }
    }

    /// 当前走子方是否存在跳吃（强制吃子判定）
    pub fn jump_possible(board: &Board) -> bool {
        let mover = board.whose_move();
        let colors = board.colors();
        Square::all().any(|sq| {
            colors[sq.index()] == Some(mover) && Self::can_jump(&colors, sq, mover, &[])
        })
    }

    /// 枚举当前走子方的全部合法走法
    ///
    /// 存在跳吃时只返回最长连跳；否则返回全部合法单步。
    /// 起点按索引升序，落点按邻接表顺序，结果是确定的。
    pub fn generate(board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        let mover = board.whose_move();
        if Self::jump_possible(board) {
            let mut colors = board.colors();
            for sq in Square::all() {
                if colors[sq.index()] != Some(mover) {
                    continue;
                }
                let mut chain = Vec::new();
                let mut visited = Vec::new();
                Self::collect_chains(&mut colors, sq, mover, &mut chain, &mut visited, &mut moves);
            }
        } else {
            for sq in Square::all() {
                if board.get(sq) != Some(mover) {
                    continue;
                }
                for &to in Adjacency::neighbors(sq) {
                    let mv = Move::step(sq, to);
                    if Self::legal_move(board, &mv) {
                        moves.push(mv);
                    }
                }
            }
        }
        moves
    }

    /// 单步合法性
    fn legal_step(board: &Board, from: Square, to: Square) -> bool {
        if board.get(from) != Some(board.whose_move()) {
            return false;
        }
        if Self::jump_possible(board) {
            return false;
        }
        if !Adjacency::neighbors(from).contains(&to) {
            return false;
        }
        if board.get(to).is_some() {
            return false;
        }
        match lateral_of(from, to) {
            Some(dir) => {
                // 横向锁：不许立刻反向横移
                match (board.lock(from), dir) {
                    (LateralLock::Right, LateralLock::Left)
                    | (LateralLock::Left, LateralLock::Right) => return false,
                    _ => {}
                }
            }
            None => {
                // 禁止后退：白方不降行，黑方不升行
                match board.whose_move() {
                    Side::White if to.row() < from.row() => return false,
                    Side::Black if to.row() > from.row() => return false,
                    _ => {}
                }
            }
        }
        true
    }

    /// 在临时颜色布局上逐段校验跳吃链
    ///
    /// require_maximal 时还要求链在最终落点无法继续延伸。
    fn valid_jump_chain(board: &Board, steps: &[JumpStep], require_maximal: bool) -> bool {
        let Some(first) = steps.first() else {
            return false;
        };
        let Some(mover) = board.get(first.from) else {
            return false;
        };
        let mut colors = board.colors();
        let mut landings: Vec<Square> = Vec::with_capacity(steps.len());
        let mut cursor = first.from;
        for step in steps {
            if step.from != cursor {
                return false;
            }
            if !Adjacency::jump_targets(step.from).contains(&step.to) {
                return false;
            }
            if step.over != Adjacency::jumped_over(step.from, step.to) {
                return false;
            }
            if colors[step.to.index()].is_some() {
                return false;
            }
            if colors[step.over.index()] != Some(mover.opponent()) {
                return false;
            }
            if landings.contains(&step.to) {
                return false;
            }
            colors[step.from.index()] = None;
            colors[step.over.index()] = None;
            colors[step.to.index()] = Some(mover);
            landings.push(step.to);
            cursor = step.to;
        }
        if require_maximal && Self::can_jump(&colors, cursor, mover, &landings) {
            return false;
        }
        true
    }

    /// 给定颜色布局下，mover 从 sq 是否还有可走的跳吃段
    /// （落点不得重复使用）
    fn can_jump(colors: &[Option<Side>], sq: Square, mover: Side, visited: &[Square]) -> bool {
        Adjacency::jump_targets(sq).iter().any(|&to| {
            colors[to.index()].is_none()
                && !visited.contains(&to)
                && colors[Adjacency::jumped_over(sq, to).index()] == Some(mover.opponent())
        })
    }

    /// 自 sq 深度优先延伸跳吃链，只收集无法再延伸的链
    fn collect_chains(
        colors: &mut [Option<Side>],
        sq: Square,
        mover: Side,
        chain: &mut Vec<JumpStep>,
        visited: &mut Vec<Square>,
        out: &mut Vec<Move>,
    ) {
        let mut extended = false;
        for &to in Adjacency::jump_targets(sq) {
            let over = Adjacency::jumped_over(sq, to);
            if colors[to.index()].is_some() {
                continue;
            }
            if colors[over.index()] != Some(mover.opponent()) {
                continue;
            }
            if visited.contains(&to) {
                continue;
            }
            extended = true;
            colors[sq.index()] = None;
            colors[over.index()] = None;
            colors[to.index()] = Some(mover);
            chain.push(JumpStep { from: sq, over, to });
            visited.push(to);

            Self::collect_chains(colors, to, mover, chain, visited, out);

            visited.pop();
            chain.pop();
            colors[to.index()] = None;
            colors[over.index()] = Some(mover.opponent());
            colors[sq.index()] = Some(mover);
        }
        if !extended && !chain.is_empty() {
            out.push(Move::jump(chain.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::Notation;

    /// 七步对局，覆盖单步、单段跳与两段连跳
    const GAME1: [&str; 7] = [
        "c2-c3", "c4-c2", "c1-c3", "a3-c1", "c3-a3", "c5-c4", "a3-c5-c3",
    ];

    fn make_moves(board: &mut Board, moves: &[&str]) {
        for s in moves {
            let mv = Notation::parse_move(s).unwrap();
            assert!(board.legal_move(&mv), "move {s} should be legal");
            board.make_move(&mv);
        }
    }

    #[test]
    fn test_move_accessors() {
        let mv = Notation::parse_move("a3-b2").unwrap();
        assert!(!mv.is_jump());
        assert_eq!(mv.from().to_string(), "a3");
        assert_eq!(mv.to().to_string(), "b2");

        let mv = Notation::parse_move("a3-a5-c3").unwrap();
        assert!(mv.is_jump());
        assert_eq!(mv.from().to_string(), "a3");
        assert_eq!(mv.to().to_string(), "c3");
    }

    #[test]
    fn test_lateral_direction() {
        let right = Notation::parse_move("b2-c2").unwrap();
        assert_eq!(right.lateral(), Some(LateralLock::Right));

        let left = Notation::parse_move("c2-b2").unwrap();
        assert_eq!(left.lateral(), Some(LateralLock::Left));

        // 升行、斜走和跳吃都不算横移
        assert_eq!(Notation::parse_move("c2-c3").unwrap().lateral(), None);
        assert_eq!(Notation::parse_move("c3-d4").unwrap().lateral(), None);
        assert_eq!(Notation::parse_move("a3-c3").unwrap().lateral(), None);
    }

    #[test]
    fn test_initial_moves_are_steps() {
        let board = Board::new();
        let moves = MoveGenerator::generate(&board);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| !m.is_jump()));
        // 初始局面唯一的空格是 c3，四个白子可以走进去
        assert!(moves.iter().all(|m| m.to().to_string() == "c3"));
    }

    #[test]
    fn test_mandatory_capture() {
        let mut board = Board::new();
        make_moves(&mut board, &GAME1[..1]);
        // 白方走 c2-c3 后黑方有跳吃，单步全部非法
        assert!(MoveGenerator::jump_possible(&board));
        let moves = MoveGenerator::generate(&board);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(Move::is_jump));

        let capture = Notation::parse_move("c4-c2").unwrap();
        assert!(board.legal_move(&capture));
        let step = Notation::parse_move("b4-b3").unwrap();
        assert!(!board.legal_move(&step));
    }

    #[test]
    fn test_backward_step_illegal() {
        let mut board = Board::new();
        make_moves(&mut board, &GAME1);
        // 黑方不得升行
        let backward = Notation::parse_move("c1-c2").unwrap();
        assert!(!board.legal_move(&backward));
    }

    #[test]
    fn test_illegal_moves_after_game1() {
        let mut board = Board::new();
        make_moves(&mut board, &GAME1);

        // 第二段不是跳吃距离的链
        let bogus = Move::jump(vec![
            JumpStep::new(
                Square::from_col_row('a', '3').unwrap(),
                Square::from_col_row('c', '5').unwrap(),
            ),
            JumpStep {
                from: Square::from_col_row('c', '5').unwrap(),
                over: Square::from_col_row('c', '4').unwrap(),
                to: Square::from_col_row('c', '2').unwrap(),
            },
        ]);
        assert!(!board.legal_move(&bogus));

        // 起点不是当前走子方
        assert!(!board.legal_move(&Notation::parse_move("e2-c2").unwrap()));
        assert!(!board.legal_move(&Notation::parse_move("d2-c2").unwrap()));
        // 起点为空格
        assert!(!board.legal_move(&Notation::parse_move("c2-d2").unwrap()));
        assert!(!board.legal_move(&Notation::parse_move("b2-c2").unwrap()));
    }

    #[test]
    fn test_maximal_chain_only() {
        let mut board = Board::new();
        // 白子 c1，黑子 c2、c4：唯一合法走法是两段连跳 c1-c3-c5
        board
            .set_pieces("--w----b---------b-------", Side::White)
            .unwrap();
        let moves = MoveGenerator::generate(&board);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "c1-c3-c5");

        // 停在中途不合法，但作为前缀校验通过
        let prefix = Notation::parse_move("c1-c3").unwrap();
        assert!(!board.legal_move(&prefix));
        assert!(MoveGenerator::check_jump(&board, &prefix, true));
        assert!(!MoveGenerator::check_jump(&board, &prefix, false));
    }

    #[test]
    fn test_no_chain_is_prefix_of_another() {
        let mut board = Board::new();
        make_moves(&mut board, &GAME1[..1]);
        let moves = MoveGenerator::generate(&board);
        for (i, a) in moves.iter().enumerate() {
            for (j, b) in moves.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let (Move::Jump(sa), Move::Jump(sb)) = (a, b) {
                    let is_prefix = sa.len() < sb.len() && sb[..sa.len()] == sa[..];
                    assert!(!is_prefix, "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_lateral_lock() {
        let mut board = Board::new();
        board
            .set_pieces("------------w-------b---b", Side::White)
            .unwrap();

        // 白 c3-d3 横移，落点记下向右的锁
        make_moves(&mut board, &["c3-d3"]);
        assert_eq!(
            board.lock(Square::from_col_row('d', '3').unwrap()),
            LateralLock::Right
        );

        // 黑方随便走一步
        make_moves(&mut board, &["e5-e4"]);

        // 白方不得立刻反向横移，但可以继续向右或离开该行
        assert!(!board.legal_move(&Notation::parse_move("d3-c3").unwrap()));
        assert!(board.legal_move(&Notation::parse_move("d3-e3").unwrap()));
        assert!(board.legal_move(&Notation::parse_move("d3-d4").unwrap()));

        // 非横向到达清除横向锁
        make_moves(&mut board, &["d3-d4"]);
        assert_eq!(
            board.lock(Square::from_col_row('d', '4').unwrap()),
            LateralLock::None
        );
        assert_eq!(
            board.lock(Square::from_col_row('d', '3').unwrap()),
            LateralLock::None
        );
    }

    #[test]
    fn test_generator_color_postcondition() {
        // 生成器后置条件：所有候选走法都出自当前走子方
        let mut board = Board::new();
        for s in GAME1 {
            for mv in MoveGenerator::generate(&board) {
                assert_eq!(board.get(mv.from()), Some(board.whose_move()));
            }
            board.make_move(&Notation::parse_move(s).unwrap());
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for s in GAME1 {
            assert_eq!(Notation::parse_move(s).unwrap().to_string(), s);
        }
    }
}
