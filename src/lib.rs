use serde::{Deserialize, Serialize};

use crate::view::{Board, Mark};

pub mod view;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    Move { position: usize },
    Reset,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Assign { symbol: Mark },
    Update { board: Board },
    Result { message: String },
    Reset,
    OpponentLeft,
}
