pub mod envelope;
pub mod session;
pub mod socket;

use thiserror::Error;

use crate::config::GameMode;

pub use session::Session;
pub use socket::NakamaChannel;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("socket is not connected")]
    NotConnected,
    #[error("socket closed before a reply arrived")]
    Closed,
    #[error("failed to open socket to {0}")]
    Connect(String),
    #[error("no match joined")]
    NoMatch,
    #[error("server error {code}: {message}")]
    Server { code: i64, message: String },
    #[error("http request failed: {0}")]
    Http(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("bad payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Connection to the match server, as the controller sees it.
///
/// Implementations keep track of the joined match themselves.
#[allow(async_fn_in_trait)]
pub trait MatchChannel {
    fn match_id(&self) -> Option<String>;

    /// Fire-and-forget move request for the joined match.
    fn send_move(&self, cell: usize) -> Result<(), ChannelError>;

    /// Asks matchmaking for a match and joins it. `Ok(None)` means the
    /// server had nothing to offer.
    async fn find_match(&self, mode: GameMode) -> Result<Option<String>, ChannelError>;

    async fn leave_match(&self, match_id: &str) -> Result<(), ChannelError>;
}
