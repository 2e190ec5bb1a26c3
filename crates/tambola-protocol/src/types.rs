//! Core wire types for the Tambola protocol.
//!
//! Every message on the wire is a UTF-8 JSON envelope of the form
//! `{"type": "...", "data": {...}}`. The two envelope enums below use
//! serde's adjacent tagging to produce exactly that shape, one closed
//! catalogue per direction.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A room's short join code, e.g. `"K7Q2N"`.
///
/// Newtype over `String` so a room code can't be confused with a player
/// name in a signature. `#[serde(transparent)]` keeps the JSON a plain
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wraps a raw code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Game vocabulary
// ---------------------------------------------------------------------------

/// How numbers are drawn in a room. Informational for the core — draws
/// are always message-driven; clients use the mode to decide who shows
/// the draw button.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawMode {
    #[default]
    Auto,
    Manual,
}

/// The closed set of winning patterns a player can claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimKind {
    /// Any five of the ticket's numbers have been drawn.
    #[serde(rename = "QUICK_5")]
    Quick5,
    /// Every number in ticket row 0 has been drawn.
    FirstLine,
    /// Every number in ticket row 1 has been drawn.
    SecondLine,
    /// Every number in ticket row 2 has been drawn.
    ThirdLine,
    /// Every non-blank corner cell has been drawn.
    FourCorners,
    /// Full house: every number on the ticket has been drawn. Ends the game.
    Tambola,
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimKind::Quick5 => "QUICK_5",
            ClaimKind::FirstLine => "FIRST_LINE",
            ClaimKind::SecondLine => "SECOND_LINE",
            ClaimKind::ThirdLine => "THIRD_LINE",
            ClaimKind::FourCorners => "FOUR_CORNERS",
            ClaimKind::Tambola => "TAMBOLA",
        };
        write!(f, "{name}")
    }
}

/// Outcome of a claim adjudication, surfaced to clients in
/// [`ServerEvent::ClaimResult`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// This claim kind was already won by someone in this room.
    Already,
    /// The claimant's ticket does not satisfy the pattern yet.
    Invalid,
    /// First valid claim of this kind — awarded permanently.
    Success,
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A player's 3×9 number grid. `0` marks a blank cell.
///
/// Structural invariants (enforced by the generator, relied on by the
/// validator): 5 numbers and 4 blanks per row; all numbers distinct;
/// column `c` holds only values in `[10c+1, 10c+10]` (column 8 is capped
/// at 90); numbers strictly increase down a column.
///
/// Serializes as a plain nested array, e.g. `[[0,12,0,...],...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket([[u8; Ticket::COLS]; Ticket::ROWS]);

impl Ticket {
    pub const ROWS: usize = 3;
    pub const COLS: usize = 9;

    /// Wraps a raw grid. The caller vouches for the invariants.
    pub fn from_grid(grid: [[u8; Self::COLS]; Self::ROWS]) -> Self {
        Self(grid)
    }

    /// Returns the underlying grid.
    pub fn grid(&self) -> &[[u8; Self::COLS]; Self::ROWS] {
        &self.0
    }

    /// The value at `(row, col)`; `0` means blank.
    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// The numbers (non-blank cells) of one row, left to right.
    pub fn row_numbers(&self, row: usize) -> impl Iterator<Item = u8> + '_ {
        self.0[row].iter().copied().filter(|&n| n != 0)
    }

    /// Every number on the ticket, row by row.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.0
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .filter(|&n| n != 0)
    }

    /// The four corner cells: `(0,0)`, `(0,8)`, `(2,0)`, `(2,8)`.
    /// Blank corners come back as `0`.
    pub fn corners(&self) -> [u8; 4] {
        let last_row = Self::ROWS - 1;
        let last_col = Self::COLS - 1;
        [
            self.0[0][0],
            self.0[0][last_col],
            self.0[last_row][0],
            self.0[last_row][last_col],
        ]
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// One row of the end-of-game leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Everything a client may send, one variant per `type` tag.
///
/// Adjacent tagging produces `{"type": "CREATE_ROOM", "data": {...}}`.
/// The payload-free messages are unit variants, so `{"type":
/// "START_GAME"}` (no `data` key) parses — that is what clients send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// Open a new room with the sender as host and sole roster entry.
    CreateRoom {
        player_name: String,
        #[serde(default)]
        mode: DrawMode,
    },
    /// Join an existing room by code.
    JoinRoom {
        room_id: RoomCode,
        player_name: String,
    },
    /// Host only: deal tickets and start the game.
    StartGame,
    /// Draw the next undrawn number.
    DrawNumber,
    /// Assert that the sender's ticket satisfies a pattern.
    MakeClaim { claim: ClaimKind },
}

/// Everything the server may send, one variant per `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerEvent {
    /// Unicast to the creator: the new room's join code.
    RoomCreated { room_id: RoomCode },
    /// Broadcast: the roster in registration order.
    PlayersUpdate { players: Vec<String> },
    /// Unicast to each player at game start: their own ticket.
    TicketAssigned { ticket: Ticket },
    /// Broadcast: the game has started.
    GameStarted { mode: DrawMode },
    /// Broadcast: a freshly drawn number.
    NumberDrawn { number: u8 },
    /// Claim adjudication result. `player` is set only on SUCCESS,
    /// which is broadcast; ALREADY and INVALID are unicast to the
    /// claimant.
    ClaimResult {
        status: ClaimStatus,
        claim: ClaimKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player: Option<String>,
    },
    /// Broadcast after every successful claim.
    ScoreUpdate {
        scores: HashMap<String, u32>,
        claims_won: HashMap<String, Vec<ClaimKind>>,
    },
    /// Broadcast once, on the TAMBOLA claim that ends the game.
    /// Ranked by score descending, ties by registration order.
    GameEnded { leaderboard: Vec<LeaderboardEntry> },
}

// =========================================================================
// Tests
// =========================================================================
