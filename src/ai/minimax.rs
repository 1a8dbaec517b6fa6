use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{Board, Mark, Pos, Rotation};

pub const WIN_SCORE: i32 = 10;
pub const LOSE_SCORE: i32 = -10;
pub const DRAW_SCORE: i32 = 0;

/// Deepest horizon a search may use; keeps `WIN_SCORE - depth` above the
/// draw score.
pub const MAX_DEPTH: usize = WIN_SCORE as usize - 1;

/// Leaf positions an automatically sized horizon may reach.
pub const NODE_BUDGET: u64 = 1_000_000;

/// Search settings, loadable from the `[search]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the root; nodes past it are scored as draws.
    /// Unset means [`auto_depth`] picks one from the number of free cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Break ties by (column, row) instead of the row-major order the free
    /// cells are enumerated in.
    pub stable_order: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: None,
            stable_order: true,
        }
    }
}

/// Deepest horizon whose full tree over `free_cells` stays within
/// [`NODE_BUDGET`] leaves, capped at [`MAX_DEPTH`]. Never below one ply.
///
/// A 3x3 board is searched to the end; a 4x4 board after one move gets 5
/// plies, a 6x7 board 3.
pub fn auto_depth(free_cells: usize) -> usize {
    let mut depth = 0;
    let mut leaves: u64 = 1;
    while depth < MAX_DEPTH && depth < free_cells {
        let next = leaves.saturating_mul((free_cells - depth) as u64);
        if next > NODE_BUDGET {
            break;
        }
        leaves = next;
        depth += 1;
    }
    depth.max(1)
}

/// One position in the search tree: the board right after `last_move`,
/// with `rotation` holding the marks still to play (head moves next).
#[derive(Debug, Clone)]
pub struct SearchNode {
    board: Board,
    last_move: Pos,
    rotation: Rotation<Mark>,
    streak: usize,
    depth: usize,
}

impl SearchNode {
    pub fn new(board: Board, last_move: Pos, rotation: Rotation<Mark>, streak: usize) -> Self {
        SearchNode {
            board,
            last_move,
            rotation,
            streak,
            depth: 0,
        }
    }

    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn child(&self, pos: Pos) -> SearchNode {
        SearchNode {
            board: self.board.with_mark(pos, *self.rotation.current()),
            last_move: pos,
            rotation: self.rotation.advanced(),
            streak: self.streak,
            depth: self.depth + 1,
        }
    }
}

/// A scored move. Scores only mean something relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub score: i32,
    pub pos: Pos,
}

/// A prediction together with how much work it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub prediction: Prediction,
    /// Plies searched below the root
    pub horizon: usize,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Depth-bounded minimax over every free cell.
///
/// Children of a node are evaluated as separate rayon tasks, each on its own
/// copy of the board. The parent collects all of them before picking the
/// best (its own turn) or worst (anyone else's turn) score for the maximizer.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    config: SearchConfig,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Self {
        Minimax { config }
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Minimax::new(SearchConfig {
            max_depth: Some(max_depth),
            ..SearchConfig::default()
        })
    }

    /// Plies this engine searches below `node`
    pub fn horizon(&self, node: &SearchNode) -> usize {
        self.config
            .max_depth
            .unwrap_or_else(|| auto_depth(node.board.empty_cells().len()))
    }

    /// Best move for the player to move at `node`, scored for `maximizer`.
    pub fn search(&self, node: &SearchNode, maximizer: Mark) -> Prediction {
        self.analyze(node, maximizer).prediction
    }

    /// Like [`Minimax::search`], also counting evaluated nodes.
    pub fn analyze(&self, node: &SearchNode, maximizer: Mark) -> SearchReport {
        let start = Instant::now();
        let nodes = AtomicU64::new(0);
        let horizon = self.horizon(node);
        let prediction = self.evaluate(node, maximizer, node.depth + horizon, &nodes);
        let report = SearchReport {
            prediction,
            horizon,
            nodes: nodes.into_inner(),
            elapsed: start.elapsed(),
        };

        debug!(
            maximizer = %maximizer,
            score = report.prediction.score,
            pos = %report.prediction.pos,
            nodes = report.nodes,
            horizon,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "search finished"
        );
        report
    }

    fn evaluate(
        &self,
        node: &SearchNode,
        maximizer: Mark,
        cutoff: usize,
        nodes: &AtomicU64,
    ) -> Prediction {
        nodes.fetch_add(1, Ordering::Relaxed);
        let depth = node.depth as i32;

        if node.board.check_win(node.last_move, node.streak) {
            let score = if node.board.mark_at(node.last_move) == Some(maximizer) {
                WIN_SCORE - depth
            } else {
                LOSE_SCORE + depth
            };
            return Prediction {
                score,
                pos: node.last_move,
            };
        }

        if node.board.is_full() || node.depth >= cutoff {
            return Prediction {
                score: DRAW_SCORE,
                pos: node.last_move,
            };
        }

        let mover = *node.rotation.current();
        let mut results = self.expand(node, maximizer, cutoff, nodes);

        if self.config.stable_order {
            results.sort_by_key(|p| (p.pos.col, p.pos.row));
        }

        let maximizing = mover == maximizer;
        let mut best: Option<Prediction> = None;
        for result in results {
            let better = match best {
                None => true,
                Some(b) if maximizing => result.score > b.score,
                Some(b) => result.score < b.score,
            };
            if better {
                best = Some(result);
            }
        }

        best.unwrap_or(Prediction {
            score: DRAW_SCORE,
            pos: node.last_move,
        })
    }

    /// Evaluate every child concurrently. Returns one prediction per empty
    /// cell, keyed by that cell, in row-major order.
    fn expand(
        &self,
        node: &SearchNode,
        maximizer: Mark,
        cutoff: usize,
        nodes: &AtomicU64,
    ) -> Vec<Prediction> {
        node.board
            .empty_cells()
            .into_par_iter()
            .map(|pos| {
                let child = node.child(pos);
                let score = self.evaluate(&child, maximizer, cutoff, nodes).score;
                Prediction { score, pos }
            })
            .collect()
    }
}
