//! Local view of a server-authoritative tic-tac-toe match.
//!
//! The server decides turns, validates moves and detects wins. Everything in
//! here mirrors what it is told; the only thing computed locally is the
//! countdown projection and whether a click is worth sending at all.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

pub const BOARD_CELLS: usize = 9;

pub const WELCOME_MESSAGE: &str = "Welcome to TicTacToe";
pub const STARTED_MESSAGE: &str = "Game Started!";
pub const YOUR_TURN_MESSAGE: &str = "Your Turn!";
pub const WAITING_MESSAGE: &str = "Wait for other player's turn!";
pub const NOT_STARTED_MESSAGE: &str = "Game hasn't started yet!";
pub const NOT_YOUR_TURN_MESSAGE: &str = "It's not your turn!";
pub const WON_MESSAGE: &str = "You won!";
pub const LOST_MESSAGE: &str = "You lost!";
pub const OPPONENT_WAIT_MESSAGE: &str = "Wait Other Player to join...";
pub const FIND_FAILED_MESSAGE: &str = "Server Error: Failed to find match!";

/// Player symbol. Travels as `0` (X) or `1` (O).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl TryFrom<u8> for Mark {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mark::X),
            1 => Ok(Mark::O),
            other => Err(format!("unknown mark {other}")),
        }
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// Row-major 3x3 grid; `None` is an empty cell.
pub type Board = [Option<Mark>; BOARD_CELLS];

pub fn empty_board() -> Board {
    [None; BOARD_CELLS]
}

/// Why a click was not turned into a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    NotStarted,
    NotYourTurn,
    Occupied,
    OutOfRange,
}

impl MoveRejection {
    /// Status line for the rejection, if the player should be told about it.
    pub fn message(self) -> Option<&'static str> {
        match self {
            MoveRejection::NotStarted => Some(NOT_STARTED_MESSAGE),
            MoveRejection::NotYourTurn => Some(NOT_YOUR_TURN_MESSAGE),
            MoveRejection::Occupied | MoveRejection::OutOfRange => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub board: Board,
    /// Mark the server assigned to us for the current match.
    pub local_mark: Option<Mark>,
    /// Whose turn it is; `None` before the first start and after a match ends.
    pub turn_mark: Option<Mark>,
    /// Seconds since epoch at which the current turn (or intermission) expires.
    pub deadline: Option<i64>,
    pub status: String,
    pub match_active: bool,
    /// Display-only projection of `deadline`, refreshed by `Tick`.
    pub millis_remaining: u64,
    pub searching: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            board: empty_board(),
            local_mark: None,
            turn_mark: None,
            deadline: None,
            status: WELCOME_MESSAGE.to_string(),
            match_active: false,
            millis_remaining: 0,
            searching: false,
        }
    }
}

impl ViewState {
    pub fn is_my_turn(&self) -> bool {
        self.local_mark.is_some() && self.turn_mark == self.local_mark
    }

    /// Local preconditions for placing a mark. Passing them does not make a
    /// move legal, the server still has the final say.
    pub fn check_move(&self, cell: usize) -> Result<Mark, MoveRejection> {
        if !self.match_active {
            return Err(MoveRejection::NotStarted);
        }
        let Some(mark) = self.local_mark.filter(|_| self.is_my_turn()) else {
            return Err(MoveRejection::NotYourTurn);
        };
        match self.board.get(cell) {
            None => Err(MoveRejection::OutOfRange),
            Some(Some(_)) => Err(MoveRejection::Occupied),
            Some(None) => Ok(mark),
        }
    }

    /// Applies one action in place. Returns `false` when the action was
    /// ignored and nothing changed.
    pub fn apply(&mut self, action: MatchAction) -> bool {
        use MatchAction::*;
        match action {
            Started {
                board,
                local_mark,
                first_turn,
            } => {
                self.board = board;
                self.local_mark = Some(local_mark);
                self.turn_mark = Some(first_turn);
                self.match_active = true;
                self.deadline = None;
                self.millis_remaining = 0;
                self.status = STARTED_MESSAGE.to_string();
            }
            TurnUpdated {
                board,
                next_turn,
                deadline,
            } => {
                self.board = board;
                self.turn_mark = Some(next_turn);
                self.deadline = Some(deadline);
                // Opponent's turn keeps whatever the player last saw.
                if self.is_my_turn() {
                    self.status = YOUR_TURN_MESSAGE.to_string();
                }
            }
            Ended {
                board,
                winner,
                next_game_start,
            } => {
                self.board = board;
                self.match_active = false;
                self.turn_mark = None;
                self.deadline = next_game_start;
                let won = winner.is_some() && winner == self.local_mark;
                self.status = if won { WON_MESSAGE } else { LOST_MESSAGE }.to_string();
            }
            Ignored => return false,
            PlaceMark { cell } => match self.check_move(cell) {
                Ok(mark) => {
                    self.board[cell] = Some(mark);
                    self.status = WAITING_MESSAGE.to_string();
                }
                Err(rejection) => match rejection.message() {
                    Some(msg) if self.status != msg => self.status = msg.to_string(),
                    _ => return false,
                },
            },
            SearchStarted => {
                self.searching = true;
            }
            SearchFinished { found } => {
                self.searching = false;
                self.status = if found {
                    OPPONENT_WAIT_MESSAGE
                } else {
                    FIND_FAILED_MESSAGE
                }
                .to_string();
            }
            Reset => {
                *self = ViewState::default();
            }
            Tick { now_ms } => {
                let Some(deadline) = self.deadline else {
                    return false;
                };
                self.millis_remaining = millis_until(deadline, now_ms);
            }
            Notice(text) => {
                self.status = text;
            }
        }
        true
    }
}

/// `max(0, deadline*1000 - now)`, in milliseconds.
pub fn millis_until(deadline_secs: i64, now_ms: f64) -> u64 {
    let remaining = deadline_secs as f64 * 1000.0 - now_ms;
    if remaining > 0.0 { remaining as u64 } else { 0 }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatchAction {
    // Server-pushed.
    Started {
        board: Board,
        local_mark: Mark,
        first_turn: Mark,
    },
    TurnUpdated {
        board: Board,
        next_turn: Mark,
        deadline: i64,
    },
    Ended {
        board: Board,
        winner: Option<Mark>,
        next_game_start: Option<i64>,
    },
    /// Event kinds this client does not act on.
    Ignored,
    // Local.
    PlaceMark { cell: usize },
    SearchStarted,
    SearchFinished { found: bool },
    Reset,
    Tick { now_ms: f64 },
    Notice(String),
}

impl Reducible for ViewState {
    type Action = MatchAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if new.apply(action) {
            Rc::new(new)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: ViewState, action: MatchAction) -> ViewState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn started(local: Mark, first: Mark) -> ViewState {
        reduce(
            ViewState::default(),
            MatchAction::Started {
                board: empty_board(),
                local_mark: local,
                first_turn: first,
            },
        )
    }

    #[test]
    fn default_is_idle() {
        let state = ViewState::default();
        assert_eq!(state.board.len(), BOARD_CELLS);
        assert!(state.board.iter().all(Option::is_none));
        assert_eq!(state.local_mark, None);
        assert_eq!(state.turn_mark, None);
        assert!(!state.match_active);
        assert!(!state.searching);
        assert_eq!(state.status, WELCOME_MESSAGE);
    }

    #[test]
    fn start_activates_and_clears_deadline() {
        let mut state = ViewState::default();
        state.deadline = Some(1_000);
        state.millis_remaining = 4_000;
        let state = reduce(
            state,
            MatchAction::Started {
                board: empty_board(),
                local_mark: Mark::O,
                first_turn: Mark::X,
            },
        );
        assert!(state.match_active);
        assert_eq!(state.deadline, None);
        assert_eq!(state.millis_remaining, 0);
        assert_eq!(state.local_mark, Some(Mark::O));
        assert_eq!(state.turn_mark, Some(Mark::X));
        assert_eq!(state.status, STARTED_MESSAGE);
    }

    #[test]
    fn turn_update_only_announces_own_turn() {
        let mut state = started(Mark::X, Mark::O);
        state.status = "something earlier".to_string();
        let mut board = empty_board();
        board[0] = Some(Mark::O);

        let state = reduce(
            state,
            MatchAction::TurnUpdated {
                board,
                next_turn: Mark::X,
                deadline: 50,
            },
        );
        assert_eq!(state.status, YOUR_TURN_MESSAGE);
        assert_eq!(state.board[0], Some(Mark::O));
        assert_eq!(state.deadline, Some(50));

        let state = reduce(
            state,
            MatchAction::TurnUpdated {
                board,
                next_turn: Mark::O,
                deadline: 70,
            },
        );
        assert_eq!(state.status, YOUR_TURN_MESSAGE);
        assert_eq!(state.turn_mark, Some(Mark::O));
        assert_eq!(state.deadline, Some(70));
    }

    #[test]
    fn end_always_clears_turn() {
        for prior in [ViewState::default(), started(Mark::X, Mark::X)] {
            let state = reduce(
                prior,
                MatchAction::Ended {
                    board: empty_board(),
                    winner: Some(Mark::X),
                    next_game_start: Some(99),
                },
            );
            assert!(!state.match_active);
            assert_eq!(state.turn_mark, None);
            assert_eq!(state.deadline, Some(99));
        }
    }

    #[test]
    fn end_reports_win_and_loss() {
        let won = reduce(
            started(Mark::O, Mark::X),
            MatchAction::Ended {
                board: empty_board(),
                winner: Some(Mark::O),
                next_game_start: None,
            },
        );
        assert_eq!(won.status, WON_MESSAGE);

        let draw = reduce(
            started(Mark::O, Mark::X),
            MatchAction::Ended {
                board: empty_board(),
                winner: None,
                next_game_start: None,
            },
        );
        assert_eq!(draw.status, LOST_MESSAGE);
    }

    #[test]
    fn ignored_event_returns_same_state() {
        let before = Rc::new(started(Mark::X, Mark::X));
        let after = before.clone().reduce(MatchAction::Ignored);
        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn move_before_start_is_rejected() {
        let state = ViewState::default();
        assert_eq!(state.check_move(0), Err(MoveRejection::NotStarted));
        let after = reduce(state.clone(), MatchAction::PlaceMark { cell: 0 });
        assert_eq!(after.board, state.board);
        assert_eq!(after.status, NOT_STARTED_MESSAGE);
    }

    #[test]
    fn move_on_opponent_turn_is_rejected() {
        let state = started(Mark::X, Mark::O);
        assert_eq!(state.check_move(4), Err(MoveRejection::NotYourTurn));
        let after = reduce(state.clone(), MatchAction::PlaceMark { cell: 4 });
        assert_eq!(after.board, state.board);
        assert_eq!(after.turn_mark, state.turn_mark);
        assert_eq!(after.status, NOT_YOUR_TURN_MESSAGE);
    }

    #[test]
    fn move_on_occupied_cell_changes_nothing() {
        let mut state = started(Mark::X, Mark::X);
        state.board[2] = Some(Mark::O);
        assert_eq!(state.check_move(2), Err(MoveRejection::Occupied));
        assert_eq!(state.check_move(9), Err(MoveRejection::OutOfRange));
        let after = reduce(state.clone(), MatchAction::PlaceMark { cell: 2 });
        assert_eq!(after, state);
        let after = reduce(state.clone(), MatchAction::PlaceMark { cell: 42 });
        assert_eq!(after, state);
    }

    #[test]
    fn accepted_move_marks_cell_optimistically() {
        let state = started(Mark::O, Mark::O);
        assert_eq!(state.check_move(7), Ok(Mark::O));
        let after = reduce(state, MatchAction::PlaceMark { cell: 7 });
        assert_eq!(after.board[7], Some(Mark::O));
        assert_eq!(after.status, WAITING_MESSAGE);
        assert!(after.match_active);
    }

    #[test]
    fn search_lifecycle() {
        let state = reduce(ViewState::default(), MatchAction::SearchStarted);
        assert!(state.searching);
        let found = reduce(state.clone(), MatchAction::SearchFinished { found: true });
        assert!(!found.searching);
        assert_eq!(found.status, OPPONENT_WAIT_MESSAGE);
        let failed = reduce(state, MatchAction::SearchFinished { found: false });
        assert!(!failed.searching);
        assert_eq!(failed.status, FIND_FAILED_MESSAGE);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = started(Mark::X, Mark::X);
        state.deadline = Some(10);
        state.searching = true;
        assert_eq!(reduce(state, MatchAction::Reset), ViewState::default());
    }

    #[test]
    fn tick_projects_deadline_and_clamps() {
        let mut state = ViewState::default();
        state.deadline = Some(100);
        let state = reduce(state, MatchAction::Tick { now_ms: 97_500.0 });
        assert_eq!(state.millis_remaining, 2_500);
        let state = reduce(state, MatchAction::Tick { now_ms: 150_000.0 });
        assert_eq!(state.millis_remaining, 0);
    }

    #[test]
    fn tick_without_deadline_is_inert() {
        let mut state = ViewState::default();
        state.millis_remaining = 1_234;
        let before = Rc::new(state);
        let after = before.clone().reduce(MatchAction::Tick { now_ms: 5.0 });
        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(after.millis_remaining, 1_234);
    }

    #[test]
    fn board_stays_nine_cells_through_a_match() {
        let actions = vec![
            MatchAction::SearchStarted,
            MatchAction::SearchFinished { found: true },
            MatchAction::Started {
                board: empty_board(),
                local_mark: Mark::X,
                first_turn: Mark::X,
            },
            MatchAction::PlaceMark { cell: 0 },
            MatchAction::PlaceMark { cell: 100 },
            MatchAction::Ignored,
            MatchAction::Tick { now_ms: 0.0 },
            MatchAction::Ended {
                board: empty_board(),
                winner: None,
                next_game_start: Some(1),
            },
            MatchAction::Reset,
        ];
        let mut state = Rc::new(ViewState::default());
        for action in actions {
            state = state.reduce(action);
            assert_eq!(state.board.len(), BOARD_CELLS);
        }
    }

    #[test]
    fn full_match_scenario() {
        let state = started(Mark::X, Mark::X);
        assert_eq!(state.status, STARTED_MESSAGE);
        assert!(state.match_active);

        let state = reduce(state, MatchAction::PlaceMark { cell: 4 });
        assert_eq!(state.board[4], Some(Mark::X));

        let mut server_board = empty_board();
        server_board[4] = Some(Mark::X);
        let state = reduce(
            state,
            MatchAction::TurnUpdated {
                board: server_board,
                next_turn: Mark::O,
                deadline: 1_000,
            },
        );
        assert_eq!(state.turn_mark, Some(Mark::O));
        assert_eq!(state.status, WAITING_MESSAGE);

        let state = reduce(
            state,
            MatchAction::Ended {
                board: server_board,
                winner: Some(Mark::O),
                next_game_start: Some(2_000),
            },
        );
        assert_eq!(state.status, LOST_MESSAGE);
        assert!(!state.match_active);
        assert_eq!(state.turn_mark, None);
    }

    #[test]
    fn mark_wire_values() {
        assert_eq!(Mark::try_from(0), Ok(Mark::X));
        assert_eq!(Mark::try_from(1), Ok(Mark::O));
        assert!(Mark::try_from(2).is_err());
        assert_eq!(u8::from(Mark::O), 1);
    }
}
