//! Round state types.

/// Where a round is in its lifecycle.
///
/// Rounds move strictly forward: `Dealing`, then `PlayerTurn`, then
/// `DealerTurn`, then `Settled`. A natural blackjack or a player bust skips
/// straight to `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    /// No cards dealt yet.
    Dealing,
    /// Waiting for the player to hit or stand.
    PlayerTurn,
    /// The dealer plays out their hand.
    DealerTurn,
    /// The round has a result. Terminal.
    Settled,
}
