use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ClientRequest, ServerMessage};

/// Status line shown when the server reports the other player gone.
pub const OPPONENT_LEFT_NOTICE: &str = "Opponent disconnected.";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mark),
}

// Cells travel as strings on the wire: "X", "O", or empty. The server pads
// empty cells with a space, so any whitespace-only string counts as empty.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Taken(mark) => mark.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.trim() {
            "" => Ok(Cell::Empty),
            "X" => Ok(Cell::Taken(Mark::X)),
            "O" => Ok(Cell::Taken(Mark::O)),
            _ => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&text),
                &"\"\", \"X\" or \"O\"",
            )),
        }
    }
}

/// Snapshot of the 9 cells, row-major. The server owns the real board; this
/// is only the last state it pushed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board {
    pub cell: [Cell; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cell: [Cell::Empty; 9],
        }
    }
}

impl Board {
    pub fn is_empty_at(&self, position: usize) -> bool {
        matches!(self.cell.get(position), Some(Cell::Empty))
    }

    pub fn clear(&mut self) {
        self.cell = [Cell::Empty; 9];
    }
}

/// Bridge between user input, server messages, and what the player sees.
///
/// Holds the connection-scoped display state (board snapshot, assigned
/// symbol, the two text lines) and does no I/O itself: inbound messages go
/// through [`BoardView::apply`], and user gestures come back out as
/// [`ClientRequest`] values for the caller to send.
#[derive(Debug, Default)]
pub struct BoardView {
    board: Board,
    symbol: Option<Mark>,
    player_text: String,
    status_text: String,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn symbol(&self) -> Option<Mark> {
        self.symbol
    }

    /// The assignment banner ("You are player X!"), empty before `assign`.
    pub fn player_text(&self) -> &str {
        &self.player_text
    }

    /// The result/notice line, empty until the server writes it.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Dispatch one inbound message into display state.
    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Assign { symbol } => {
                // Last assignment wins: the server re-assigns when it
                // re-pairs a player after the opponent leaves.
                self.symbol = Some(symbol);
                self.player_text = format!("You are player {symbol}!");
            }
            ServerMessage::Update { board } => self.board = board,
            ServerMessage::Result { message } => self.status_text = message,
            ServerMessage::Reset => {
                self.board.clear();
                self.status_text.clear();
            }
            ServerMessage::OpponentLeft => {
                self.board.clear();
                self.status_text = OPPONENT_LEFT_NOTICE.to_string();
            }
        }
    }

    /// A click on cell `position`. Occupied or out-of-range cells are no-ops;
    /// the server revalidates either way and the next update tells the truth.
    pub fn click_cell(&self, position: usize) -> Option<ClientRequest> {
        self.board
            .is_empty_at(position)
            .then_some(ClientRequest::Move { position })
    }

    /// The reset control fires regardless of board state.
    pub fn click_reset(&self) -> ClientRequest {
        ClientRequest::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [&str; 9]) -> Board {
        let json = serde_json::to_string(&cells).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn clicking_empty_cells_sends_one_move_each() {
        let view = BoardView::new();
        for position in 0..9 {
            assert_eq!(
                view.click_cell(position),
                Some(ClientRequest::Move { position })
            );
        }
    }

    #[test]
    fn clicking_taken_or_out_of_range_cells_sends_nothing() {
        let mut view = BoardView::new();
        view.apply(ServerMessage::Update {
            board: board(["X", "", "O", "", "", "", "", "", ""]),
        });
        assert_eq!(view.click_cell(0), None);
        assert_eq!(view.click_cell(2), None);
        assert_eq!(
            view.click_cell(1),
            Some(ClientRequest::Move { position: 1 })
        );
        assert_eq!(view.click_cell(9), None);
    }

    #[test]
    fn reset_control_always_fires() {
        let mut view = BoardView::new();
        assert_eq!(view.click_reset(), ClientRequest::Reset);
        view.apply(ServerMessage::Update {
            board: board(["X", "O", "X", "O", "X", "O", "X", "O", "X"]),
        });
        assert_eq!(view.click_reset(), ClientRequest::Reset);
    }

    #[test]
    fn update_replaces_cells_by_index() {
        let mut view = BoardView::new();
        view.apply(ServerMessage::Update {
            board: board(["X", "", "O", "", "", "", "", "", ""]),
        });
        assert_eq!(view.board().cell[0], Cell::Taken(Mark::X));
        assert_eq!(view.board().cell[2], Cell::Taken(Mark::O));
        for position in [1, 3, 4, 5, 6, 7, 8] {
            assert_eq!(view.board().cell[position], Cell::Empty);
        }
    }

    #[test]
    fn assign_announces_the_symbol() {
        let mut view = BoardView::new();
        assert_eq!(view.symbol(), None);
        view.apply(ServerMessage::Assign { symbol: Mark::O });
        assert_eq!(view.symbol(), Some(Mark::O));
        assert_eq!(view.player_text(), "You are player O!");
    }

    #[test]
    fn reset_clears_cells_and_status() {
        let mut view = BoardView::new();
        view.apply(ServerMessage::Update {
            board: board(["X", "O", "", "", "X", "", "", "", ""]),
        });
        view.apply(ServerMessage::Result {
            message: "Winner is X".into(),
        });
        view.apply(ServerMessage::Reset);
        assert_eq!(*view.board(), Board::default());
        assert_eq!(view.status_text(), "");
    }

    #[test]
    fn opponent_left_clears_cells_and_sets_notice() {
        let mut view = BoardView::new();
        view.apply(ServerMessage::Assign { symbol: Mark::X });
        view.apply(ServerMessage::Update {
            board: board(["X", "", "", "", "", "", "", "", ""]),
        });
        view.apply(ServerMessage::OpponentLeft);
        assert_eq!(*view.board(), Board::default());
        assert_eq!(view.status_text(), OPPONENT_LEFT_NOTICE);
        // The banner survives; only a fresh assign rewrites it.
        assert_eq!(view.player_text(), "You are player X!");
    }

    #[test]
    fn result_writes_the_status_line() {
        let mut view = BoardView::new();
        view.apply(ServerMessage::Result {
            message: "Match Draw".into(),
        });
        assert_eq!(view.status_text(), "Match Draw");
    }
}
