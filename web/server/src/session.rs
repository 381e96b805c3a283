//! Per-visitor rounds and the JSON the browser receives.

use std::time::{Duration, Instant};

use axum::http::{HeaderMap, header};
use dashmap::DashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use twentyone::{DealError, Decision, Round, RoundState, TableView};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

/// A state transition requested by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hit,
    Stand,
    /// Discard the round and deal a new one.
    Reset,
}

/// One visitor's round and the random source that deals it.
pub struct Session {
    round: Round,
    rng: ChaCha8Rng,
    last_used: Instant,
}

impl Session {
    /// Deals a fresh round from a new deck.
    ///
    /// # Errors
    ///
    /// Returns [`DealError`] if the initial deal fails.
    pub fn new(seed: u64) -> Result<Self, DealError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let round = Round::start(&mut rng)?;
        Ok(Self {
            round,
            rng,
            last_used: Instant::now(),
        })
    }

    #[cfg(test)]
    fn from_round(round: Round, rng: ChaCha8Rng) -> Self {
        Self {
            round,
            rng,
            last_used: Instant::now(),
        }
    }

    /// Applies one action. Actions that the round cannot take in its current
    /// state are logged and leave the round unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DealError`] if a reset cannot deal the new round.
    pub fn apply(&mut self, action: Action) -> Result<(), DealError> {
        let decision = match action {
            Action::Reset => {
                self.round = Round::start(&mut self.rng)?;
                return Ok(());
            }
            Action::Hit => Decision::Hit,
            Action::Stand => Decision::Stand,
        };

        if let Err(err) = self.round.apply(decision, &mut self.rng) {
            tracing::warn!(?action, %err, "ignoring action");
            return Ok(());
        }
        if self.round.state() == RoundState::DealerTurn {
            if let Err(err) = self.round.showdown(&mut self.rng) {
                tracing::warn!(%err, "dealer could not finish the round");
            }
        }
        Ok(())
    }

    #[cfg(test)]
    const fn round(&self) -> &Round {
        &self.round
    }

    /// The table as the browser may see it.
    #[must_use]
    pub fn table(&self) -> TableDto {
        TableDto::from(self.round.view())
    }
}

/// Table state sent to the browser.
///
/// Cards are presentation codes such as `sa` or `h10`; the dealer's hole
/// card is `back` until the round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDto {
    pub state: &'static str,
    pub player_cards: Vec<String>,
    pub player_score: u8,
    pub dealer_cards: Vec<String>,
    pub dealer_score: Option<u8>,
    pub game_over: bool,
    pub outcome: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl From<TableView> for TableDto {
    fn from(view: TableView) -> Self {
        let state = match view.state {
            RoundState::Dealing => "dealing",
            RoundState::PlayerTurn => "player_turn",
            RoundState::DealerTurn => "dealer_turn",
            RoundState::Settled => "settled",
        };
        Self {
            state,
            player_cards: view.player_cards.iter().map(|card| card.code()).collect(),
            player_score: view.player_value,
            dealer_cards: view.dealer_cards.iter().map(|face| face.code()).collect(),
            dealer_score: view.dealer_value,
            game_over: view.state == RoundState::Settled,
            outcome: view.result.map(|result| result.outcome.label()),
            message: view.result.map(|result| result.message()),
        }
    }
}

/// Reply to one request.
#[derive(Debug)]
pub struct Reply {
    pub session: Uuid,
    /// The session was created by this request and needs a cookie.
    pub created: bool,
    pub table: TableDto,
}

/// All live sessions, keyed by the id in the session cookie.
///
/// Sessions idle for longer than `idle_timeout` are dropped by
/// [`SessionStore::evict_idle`].
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    idle_timeout: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Loads the session, applies `action` to it and returns the new table.
    ///
    /// A missing or unknown session id starts a fresh round; the action is
    /// not applied to it.
    ///
    /// # Errors
    ///
    /// Returns [`DealError`] if a new round cannot be dealt.
    pub fn handle(&self, id: Option<Uuid>, action: Option<Action>) -> Result<Reply, DealError> {
        if let Some(id) = id {
            if let Some(mut session) = self.sessions.get_mut(&id) {
                session.last_used = Instant::now();
                if let Some(action) = action {
                    session.apply(action)?;
                }
                return Ok(Reply {
                    session: id,
                    created: false,
                    table: session.table(),
                });
            }
            tracing::debug!(%id, "unknown session");
        }

        let id = Uuid::new_v4();
        let session = Session::new(rand::random())?;
        let table = session.table();
        self.sessions.insert(id, session);
        tracing::info!(%id, sessions = self.sessions.len(), "new session");
        Ok(Reply {
            session: id,
            created: true,
            table,
        })
    }

    /// Drops every session not used since `now - idle_timeout` and returns
    /// how many were dropped.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.saturating_duration_since(session.last_used) < self.idle_timeout);
        before.saturating_sub(self.sessions.len())
    }
}

/// Reads the session id from the request's `Cookie` headers.
#[must_use]
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// `Set-Cookie` value for a new session.
#[must_use]
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}
