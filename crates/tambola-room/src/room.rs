//! Room actor: an isolated Tokio task that owns one game session.
//!
//! Each room runs in its own task, consuming commands from an mpsc
//! mailbox one at a time. That single-consumer loop is what makes every
//! "read state → decide → mutate → broadcast" sequence atomic per room:
//! two players claiming the same pattern concurrently are adjudicated
//! strictly one after the other, and rooms never share state, so a busy
//! room cannot stall another.

use std::collections::{HashMap, HashSet};

use rand::seq::IndexedRandom;
use tambola_game::{generate_ticket, validate_claim};
use tambola_protocol::{
    ClaimKind, ClaimStatus, DrawMode, LeaderboardEntry, RoomCode,
    ServerEvent, Ticket,
};
use tokio::sync::{mpsc, oneshot};

use crate::{ConnectionId, RoomError};

/// Channel sender for delivering events to one connection's writer task.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its mailbox.
///
/// Only `Join` carries a reply channel — the gateway must know whether
/// the join stuck before it records the connection as roomed. Everything
/// else is fire-and-forget: invalid commands are dropped inside the
/// actor, and adjudication outcomes travel back as [`ServerEvent`]s.
pub(crate) enum RoomCommand {
    Join {
        conn: ConnectionId,
        name: String,
        sender: EventSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Start {
        conn: ConnectionId,
    },
    Draw {
        conn: ConnectionId,
    },
    Claim {
        conn: ConnectionId,
        kind: ClaimKind,
    },
    Disconnect {
        conn: ConnectionId,
    },
    Info {
        reply: oneshot::Sender<RoomInfo>,
    },
}

/// A snapshot of room metadata for the registry and tests.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    /// Roster names in registration order.
    pub players: Vec<String>,
    /// Live (still connected) member count.
    pub connected: usize,
    pub started: bool,
    pub ended: bool,
    pub drawn_count: usize,
}

/// Handle to a running room actor. Cheap to clone — it's an
/// `mpsc::Sender` wrapper. The registry holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's join code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Adds a player to the room, binding their connection to a seat.
    pub async fn join(
        &self,
        conn: ConnectionId,
        name: String,
        sender: EventSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Join {
            conn,
            name,
            sender,
            reply: reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Asks the room to start the game. Host-gated inside the actor.
    pub async fn start(&self, conn: ConnectionId) -> Result<(), RoomError> {
        self.send(RoomCommand::Start { conn }).await
    }

    /// Asks the room to draw the next number.
    pub async fn draw(&self, conn: ConnectionId) -> Result<(), RoomError> {
        self.send(RoomCommand::Draw { conn }).await
    }

    /// Submits a claim for adjudication.
    pub async fn claim(
        &self,
        conn: ConnectionId,
        kind: ClaimKind,
    ) -> Result<(), RoomError> {
        self.send(RoomCommand::Claim { conn, kind }).await
    }

    /// Reports that a connection dropped. Never fails the room.
    pub async fn disconnect(&self, conn: ConnectionId) -> Result<(), RoomError> {
        self.send(RoomCommand::Disconnect { conn }).await
    }

    /// Requests the current room snapshot.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Info { reply: reply_tx }).await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }
}

/// One roster entry. Append-only: a disconnect clears `conn` but the
/// name, score, and claim history stay for the final leaderboard.
struct Seat {
    name: String,
    conn: Option<ConnectionId>,
    ticket: Option<Ticket>,
    score: u32,
    claims_won: Vec<ClaimKind>,
}

impl Seat {
    fn new(name: String, conn: ConnectionId) -> Self {
        Self {
            name,
            conn: Some(conn),
            ticket: None,
            score: 0,
            claims_won: Vec::new(),
        }
    }
}

/// The internal room actor state. Runs inside a Tokio task and is the
/// sole mutator of everything in here.
struct RoomActor {
    code: RoomCode,
    mode: DrawMode,
    host: ConnectionId,
    /// Roster in registration order.
    seats: Vec<Seat>,
    /// Connection → seat index. Claimant identity resolves through this
    /// binding, never through anything a later message could overwrite.
    bindings: HashMap<ConnectionId, usize>,
    /// Per-connection outbound channels.
    senders: HashMap<ConnectionId, EventSender>,
    drawn: HashSet<u8>,
    /// Claim kinds already won in this room. First valid claimant wins,
    /// permanently.
    awarded: HashSet<ClaimKind>,
    started: bool,
    ended: bool,
    receiver: mpsc::Receiver<RoomCommand>,
}

/// Highest drawable number.
const MAX_NUMBER: u8 = 90;

impl RoomActor {
    /// Runs the actor loop until every handle is gone.
    async fn run(mut self) {
        tracing::info!(room = %self.code, host = %self.host, "room opened");

        // Creation replies to the requester with the code, then the
        // roster goes out like any other join.
        self.send_to(
            self.host,
            ServerEvent::RoomCreated {
                room_id: self.code.clone(),
            },
        );
        self.broadcast_roster();

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    conn,
                    name,
                    sender,
                    reply,
                } => {
                    let _ = reply.send(self.handle_join(conn, name, sender));
                }
                RoomCommand::Start { conn } => self.handle_start(conn),
                RoomCommand::Draw { conn } => self.handle_draw(conn),
                RoomCommand::Claim { conn, kind } => {
                    self.handle_claim(conn, kind)
                }
                RoomCommand::Disconnect { conn } => {
                    self.handle_disconnect(conn)
                }
                RoomCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
            }
        }

        tracing::info!(room = %self.code, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        conn: ConnectionId,
        name: String,
        sender: EventSender,
    ) -> Result<(), RoomError> {
        if self.started {
            tracing::debug!(
                room = %self.code, %conn, player = %name,
                "late join rejected, game already started"
            );
            return Err(RoomError::AlreadyStarted(self.code.clone()));
        }

        let seat = self.seats.len();
        self.seats.push(Seat::new(name.clone(), conn));
        self.bindings.insert(conn, seat);
        self.senders.insert(conn, sender);
        tracing::info!(
            room = %self.code, %conn, player = %name,
            players = self.seats.len(), "player joined"
        );

        self.broadcast_roster();
        Ok(())
    }

    fn handle_start(&mut self, conn: ConnectionId) {
        if conn != self.host {
            tracing::debug!(
                room = %self.code, %conn,
                "start from non-host, ignoring"
            );
            return;
        }
        if self.started {
            tracing::debug!(room = %self.code, "start repeated, ignoring");
            return;
        }

        self.started = true;

        // Tickets are assigned exactly once, here, for the current
        // roster. Each player sees only their own.
        let mut rng = rand::rng();
        for seat in &mut self.seats {
            seat.ticket = Some(generate_ticket(&mut rng));
        }
        for seat in &self.seats {
            if let (Some(conn), Some(ticket)) = (seat.conn, seat.ticket) {
                if let Some(sender) = self.senders.get(&conn) {
                    let _ = sender
                        .send(ServerEvent::TicketAssigned { ticket });
                }
            }
        }

        tracing::info!(
            room = %self.code, players = self.seats.len(),
            mode = ?self.mode, "game started"
        );
        self.broadcast(ServerEvent::GameStarted { mode: self.mode });
    }

    fn handle_draw(&mut self, conn: ConnectionId) {
        if !self.started || self.ended {
            tracing::debug!(
                room = %self.code, %conn,
                "draw outside running game, ignoring"
            );
            return;
        }
        if !self.bindings.contains_key(&conn) {
            tracing::debug!(
                room = %self.code, %conn, "draw from non-member, ignoring"
            );
            return;
        }

        // Uniform over the undrawn remainder; never re-rolls, so this
        // terminates even on the 90th draw.
        let undrawn: Vec<u8> = (1..=MAX_NUMBER)
            .filter(|n| !self.drawn.contains(n))
            .collect();
        let Some(&number) = undrawn.choose(&mut rand::rng()) else {
            tracing::debug!(room = %self.code, "all 90 numbers drawn");
            return;
        };

        self.drawn.insert(number);
        tracing::debug!(
            room = %self.code, number, drawn = self.drawn.len(), "number drawn"
        );
        self.broadcast(ServerEvent::NumberDrawn { number });
    }

    fn handle_claim(&mut self, conn: ConnectionId, kind: ClaimKind) {
        if !self.started || self.ended {
            tracing::debug!(
                room = %self.code, %conn, claim = %kind,
                "claim outside running game, ignoring"
            );
            return;
        }
        let Some(&seat_idx) = self.bindings.get(&conn) else {
            tracing::debug!(
                room = %self.code, %conn, "claim from non-member, ignoring"
            );
            return;
        };

        if self.awarded.contains(&kind) {
            self.send_to(
                conn,
                ServerEvent::ClaimResult {
                    status: ClaimStatus::Already,
                    claim: kind,
                    player: None,
                },
            );
            return;
        }

        let valid = self.seats[seat_idx]
            .ticket
            .as_ref()
            .is_some_and(|ticket| validate_claim(ticket, &self.drawn, kind));
        if !valid {
            tracing::debug!(
                room = %self.code, player = %self.seats[seat_idx].name,
                claim = %kind, "claim rejected"
            );
            self.send_to(
                conn,
                ServerEvent::ClaimResult {
                    status: ClaimStatus::Invalid,
                    claim: kind,
                    player: None,
                },
            );
            return;
        }

        self.awarded.insert(kind);
        let seat = &mut self.seats[seat_idx];
        seat.score += 1;
        seat.claims_won.push(kind);
        let winner = seat.name.clone();
        tracing::info!(
            room = %self.code, player = %winner, claim = %kind, "claim awarded"
        );

        self.broadcast(ServerEvent::ClaimResult {
            status: ClaimStatus::Success,
            claim: kind,
            player: Some(winner),
        });
        self.broadcast(ServerEvent::ScoreUpdate {
            scores: self
                .seats
                .iter()
                .map(|s| (s.name.clone(), s.score))
                .collect(),
            claims_won: self
                .seats
                .iter()
                .map(|s| (s.name.clone(), s.claims_won.clone()))
                .collect(),
        });

        if kind == ClaimKind::Tambola {
            self.finish();
        }
    }

    /// Full house claimed: the room is over, for good.
    fn finish(&mut self) {
        self.ended = true;

        // Stable sort: ties keep registration order.
        let mut ranked: Vec<&Seat> = self.seats.iter().collect();
        ranked.sort_by_key(|seat| std::cmp::Reverse(seat.score));
        let leaderboard = ranked
            .into_iter()
            .map(|seat| LeaderboardEntry {
                name: seat.name.clone(),
                score: seat.score,
            })
            .collect();

        tracing::info!(room = %self.code, "game ended");
        self.broadcast(ServerEvent::GameEnded { leaderboard });
    }

    fn handle_disconnect(&mut self, conn: ConnectionId) {
        let Some(seat_idx) = self.bindings.remove(&conn) else {
            return;
        };
        self.senders.remove(&conn);
        self.seats[seat_idx].conn = None;

        tracing::info!(
            room = %self.code, %conn, player = %self.seats[seat_idx].name,
            "player disconnected"
        );
        self.broadcast_roster();
    }

    /// Broadcasts the roster in registration order.
    fn broadcast_roster(&self) {
        self.broadcast(ServerEvent::PlayersUpdate {
            players: self.seats.iter().map(|s| s.name.clone()).collect(),
        });
    }

    /// Delivers one event to every live connection, in roster order.
    /// A dead receiver is skipped; it never aborts the fan-out.
    fn broadcast(&self, event: ServerEvent) {
        for seat in &self.seats {
            if let Some(conn) = seat.conn {
                self.send_to(conn, event.clone());
            }
        }
    }

    /// Sends an event to a single connection. Silently drops if the
    /// receiver is gone (writer task exited).
    fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&conn) {
            if sender.send(event).is_err() {
                tracing::debug!(
                    room = %self.code, %conn,
                    "dropping event for departed connection"
                );
            }
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.code.clone(),
            players: self.seats.iter().map(|s| s.name.clone()).collect(),
            connected: self.bindings.len(),
            started: self.started,
            ended: self.ended,
            drawn_count: self.drawn.len(),
        }
    }
}

/// Spawns a new room actor with the creator seated as host, and returns
/// a handle to it.
pub(crate) fn spawn_room(
    code: RoomCode,
    mode: DrawMode,
    host: ConnectionId,
    host_name: String,
    host_sender: EventSender,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let mut actor = RoomActor {
        code: code.clone(),
        mode,
        host,
        seats: vec![Seat::new(host_name, host)],
        bindings: HashMap::new(),
        senders: HashMap::new(),
        drawn: HashSet::new(),
        awarded: HashSet::new(),
        started: false,
        ended: false,
        receiver: rx,
    };
    actor.bindings.insert(host, 0);
    actor.senders.insert(host, host_sender);

    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
