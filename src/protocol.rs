//! Match data exchanged with the authoritative match handler.
//!
//! Every realtime message carries an opcode plus a JSON body. Inbound bodies
//! are decoded into [`ServerEvent`]; the only outbound body is a move.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{BOARD_CELLS, Board, Mark};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpCode {
    Start,
    Update,
    Done,
    Move,
    Rejected,
}

impl OpCode {
    pub fn from_wire(code: i64) -> Option<Self> {
        match code {
            1 => Some(OpCode::Start),
            2 => Some(OpCode::Update),
            3 => Some(OpCode::Done),
            4 => Some(OpCode::Move),
            5 => Some(OpCode::Rejected),
            _ => None,
        }
    }

    pub fn wire(self) -> i64 {
        match self {
            OpCode::Start => 1,
            OpCode::Update => 2,
            OpCode::Done => 3,
            OpCode::Move => 4,
            OpCode::Rejected => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed {op:?} payload: {source}")]
    Json {
        op: OpCode,
        #[source]
        source: serde_json::Error,
    },
    #[error("board has {0} cells, expected 9")]
    BoardSize(usize),
}

#[derive(Debug, Deserialize)]
struct StartMessage {
    board: Vec<Option<Mark>>,
    marks: HashMap<String, Mark>,
    mark: Mark,
}

#[derive(Debug, Deserialize)]
struct UpdateMessage {
    board: Vec<Option<Mark>>,
    mark: Mark,
    deadline: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoneMessage {
    board: Vec<Option<Mark>>,
    winner: Option<Mark>,
    #[serde(default)]
    next_game_start: Option<i64>,
}

#[derive(Debug, Serialize)]
struct MoveMessage {
    position: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    MatchStarted {
        board: Board,
        /// Identity -> mark assignment for everyone in the match.
        marks: HashMap<String, Mark>,
        first_turn: Mark,
    },
    TurnUpdated {
        board: Board,
        next_turn: Mark,
        deadline: i64,
    },
    MatchEnded {
        board: Board,
        winner: Option<Mark>,
        next_game_start: Option<i64>,
    },
    /// Opcodes this client does not act on, known or not.
    Unknown(i64),
}

fn into_board(cells: Vec<Option<Mark>>) -> Result<Board, ProtocolError> {
    let len = cells.len();
    Board::try_from(cells).map_err(|_| ProtocolError::BoardSize(len))
}

fn parse<'a, T: Deserialize<'a>>(op: OpCode, data: &'a [u8]) -> Result<T, ProtocolError> {
    serde_json::from_slice(data).map_err(|source| ProtocolError::Json { op, source })
}

pub fn decode_event(op_code: i64, data: &[u8]) -> Result<ServerEvent, ProtocolError> {
    let Some(op) = OpCode::from_wire(op_code) else {
        return Ok(ServerEvent::Unknown(op_code));
    };
    match op {
        OpCode::Start => {
            let msg: StartMessage = parse(op, data)?;
            Ok(ServerEvent::MatchStarted {
                board: into_board(msg.board)?,
                marks: msg.marks,
                first_turn: msg.mark,
            })
        }
        OpCode::Update => {
            let msg: UpdateMessage = parse(op, data)?;
            Ok(ServerEvent::TurnUpdated {
                board: into_board(msg.board)?,
                next_turn: msg.mark,
                deadline: msg.deadline,
            })
        }
        OpCode::Done => {
            let msg: DoneMessage = parse(op, data)?;
            Ok(ServerEvent::MatchEnded {
                board: into_board(msg.board)?,
                winner: msg.winner,
                next_game_start: msg.next_game_start,
            })
        }
        OpCode::Move | OpCode::Rejected => Ok(ServerEvent::Unknown(op_code)),
    }
}

/// JSON body of a move request for `cell`.
pub fn encode_move(cell: usize) -> Result<Vec<u8>, serde_json::Error> {
    debug_assert!(cell < BOARD_CELLS);
    serde_json::to_vec(&MoveMessage { position: cell })
}
