//! Constants for board geometry, scoring weights and search parameters.
//!
//! The board is a fixed 5x5 grid. Coordinates are `(x, y)` with `x` the
//! column and `y` the row; player 1 starts on row 0 and advances toward
//! row 4, player 2 starts on row 4 and advances toward row 0.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const BOARD_SIZE: i32 = 5;

/// Pieces per army at the start of a game (master plus four students).
pub const ARMY_CAPACITY: usize = 5;

/// Most offsets carried by any card in the standard deck.
pub const MAX_CARD_MOVES: usize = 4;

/// Home row of player 1.
pub const HOME_ROW_ONE: i32 = 0;

/// Home row of player 2.
pub const HOME_ROW_TWO: i32 = BOARD_SIZE - 1;

/// Column of the master and of both shrine cells.
pub const MASTER_COLUMN: i32 = 2;

/// Starting columns, master first.
pub const START_COLUMNS: [i32; ARMY_CAPACITY] = [MASTER_COLUMN, 0, 1, 3, 4];

// =============================================================================
// Heuristic Scoring
// =============================================================================

/// Value of each surviving piece.
pub const SCORE_UNIT: i32 = 100;

/// Candidate move onto an empty cell.
pub const SCORE_TILE: i32 = 1;

/// Candidate move onto an own non-master piece.
pub const SCORE_PROTECT: i32 = 1;

/// Candidate capture of a student while the opponent is to move.
pub const SCORE_THREAT: i32 = 10;

/// Candidate capture of a student while the scored side is to move.
pub const SCORE_KILL: i32 = 90;

/// Candidate win while the opponent is to move.
pub const SCORE_CHECK: i32 = 20;

/// Candidate win while the scored side is to move.
pub const SCORE_CHECKMATE: i32 = 10000;

// =============================================================================
// Search Parameters
// =============================================================================

/// UCT exploration constant.
pub const UCT_EXPLORATION: f64 = 1.4;

/// Default number of MCTS iterations per move.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default negamax depth.
pub const DEFAULT_DEPTH: u32 = 2;

/// Upper bound on plies played by a single rollout.
pub const MAX_ROLLOUT_PLIES: usize = 1000;

/// Score reported by negamax for a position with no legal moves.
pub const NEGAMAX_FLOOR: i32 = -999_999;

/// Score reported by the one-ply evaluator for a position with no legal moves.
pub const EVALUATOR_FLOOR: i32 = -999_991;
