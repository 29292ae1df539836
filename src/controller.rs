//! Glue between the reducer and the match channel.
//!
//! Moves use a "local write, server overwrite" policy: an accepted click marks
//! the cell right away and the next board the server pushes replaces it
//! wholesale, whatever the server decided.

use crate::config::GameMode;
use crate::model::{MatchAction, ViewState};
use crate::net::MatchChannel;
use crate::protocol::{ServerEvent, decode_event};
use crate::util::{clog, cwarn};

/// Turns one inbound match message into a reducer action. Messages that
/// cannot be decoded, or a start that does not name us, are logged and
/// dropped.
pub fn handle_match_data(user_id: &str, op_code: i64, data: &[u8]) -> Option<MatchAction> {
    let event = match decode_event(op_code, data) {
        Ok(event) => event,
        Err(err) => {
            cwarn(&format!("dropping match data (op {op_code}): {err}"));
            return None;
        }
    };
    let action = match event {
        ServerEvent::MatchStarted {
            board,
            marks,
            first_turn,
        } => {
            let Some(local_mark) = marks.get(user_id).copied() else {
                cwarn(&format!("match start has no mark for user {user_id}"));
                return None;
            };
            MatchAction::Started {
                board,
                local_mark,
                first_turn,
            }
        }
        ServerEvent::TurnUpdated {
            board,
            next_turn,
            deadline,
        } => MatchAction::TurnUpdated {
            board,
            next_turn,
            deadline,
        },
        ServerEvent::MatchEnded {
            board,
            winner,
            next_game_start,
        } => MatchAction::Ended {
            board,
            winner,
            next_game_start,
        },
        ServerEvent::Unknown(op) => {
            clog(&format!("ignoring op code {op}"));
            MatchAction::Ignored
        }
    };
    Some(action)
}

/// Handles a board click. The returned action always goes to the reducer;
/// the move is sent only when the local checks pass.
pub fn request_move<C: MatchChannel>(state: &ViewState, channel: &C, cell: usize) -> MatchAction {
    if state.check_move(cell).is_ok() {
        if let Err(err) = channel.send_move(cell) {
            cwarn(&format!("move {cell} not sent: {err}"));
        }
    }
    MatchAction::PlaceMark { cell }
}

pub async fn find_match<C, D>(searching: bool, mode: GameMode, channel: &C, dispatch: D)
where
    C: MatchChannel,
    D: Fn(MatchAction),
{
    if searching {
        return;
    }
    dispatch(MatchAction::SearchStarted);
    let found = match channel.find_match(mode).await {
        Ok(found) => found,
        Err(err) => {
            cwarn(&format!("find match failed: {err}"));
            None
        }
    };
    if let Some(match_id) = &found {
        clog(&format!("find match, match id: {match_id}"));
    }
    dispatch(MatchAction::SearchFinished {
        found: found.is_some(),
    });
}

/// Resets right away, then tells the server we left. The outcome of the
/// leave call is never shown to the player.
pub async fn leave_match<C, D>(channel: &C, dispatch: D)
where
    C: MatchChannel,
    D: Fn(MatchAction),
{
    dispatch(MatchAction::Reset);
    let Some(match_id) = channel.match_id() else {
        return;
    };
    if let Err(err) = channel.leave_match(&match_id).await {
        cwarn(&format!("leave match {match_id} failed: {err}"));
    }
}

pub fn play_again<D: Fn(MatchAction)>(dispatch: D) {
    dispatch(MatchAction::Reset);
}
