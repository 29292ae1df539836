//! JSON frames of the realtime socket.
//!
//! Requests that expect a reply carry a `cid`; the reply echoes it back.
//! Match data bytes travel base64 encoded.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Outgoing<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(flatten)]
    pub body: OutgoingBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutgoingBody<'a> {
    Rpc {
        id: &'a str,
        payload: String,
    },
    MatchJoin {
        match_id: &'a str,
    },
    MatchLeave {
        match_id: &'a str,
    },
    MatchDataSend {
        match_id: &'a str,
        op_code: String,
        data: String,
    },
}

impl<'a> OutgoingBody<'a> {
    pub fn match_data(match_id: &'a str, op_code: i64, bytes: &[u8]) -> Self {
        OutgoingBody::MatchDataSend {
            match_id,
            op_code: op_code.to_string(),
            data: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Incoming {
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default)]
    pub rpc: Option<RpcBody>,
    #[serde(default, rename = "match")]
    pub joined: Option<MatchInfo>,
    #[serde(default)]
    pub match_data: Option<MatchData>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcBody {
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchInfo {
    pub match_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchData {
    pub match_id: String,
    #[serde(deserialize_with = "int_or_string")]
    pub op_code: i64,
    #[serde(default)]
    pub data: String,
}

impl MatchData {
    pub fn bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.as_bytes())
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "int_or_string")]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FindMatchRequest {
    pub fast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct FindMatchResponse {
    #[serde(default, rename = "matchIds")]
    pub match_ids: Vec<String>,
}

// int64 fields arrive as JSON strings from protobuf-backed servers.
fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Int(i64),
        Str(String),
    }
    match Wire::deserialize(deserializer)? {
        Wire::Int(v) => Ok(v),
        Wire::Str(s) => s.parse().map_err(de::Error::custom),
    }
}
