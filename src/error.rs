//! Error types for round operations and input parsing.

use thiserror::Error;

/// Errors that can occur while dealing a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// The round has already been dealt.
    #[error("invalid round state for dealing")]
    InvalidState,
    /// Not enough cards in the deck for the initial deal.
    #[error("not enough cards in the deck")]
    NotEnoughCards,
    /// A dealt hand does not hold exactly two cards.
    #[error("each dealt hand must hold exactly two cards")]
    InvalidHands,
    /// A card appears twice across the hands and the deck.
    #[error("card appears more than once")]
    DuplicateCard,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The round is not waiting for a player decision.
    #[error("invalid round state for this action")]
    InvalidState,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
}

/// Errors that can occur while the dealer plays out its hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealerError {
    /// The round is not in the dealer's turn.
    #[error("invalid round state for dealer play")]
    InvalidState,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
}

/// Errors that can occur while playing a whole round with a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// A player action failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Dealer play failed.
    #[error(transparent)]
    Dealer(#[from] DealerError),
}

/// Errors returned when parsing a card code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The input was empty.
    #[error("empty card code")]
    Empty,
    /// The first character is not a suit letter.
    #[error("unknown suit letter")]
    UnknownSuit,
    /// The remainder is not a rank label.
    #[error("unknown rank")]
    UnknownRank,
}

/// Error returned when a player decision is neither hit nor stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected `hit` or `stand`")]
pub struct ParseDecisionError;
