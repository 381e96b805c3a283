//! What the presentation layer is allowed to see of a round.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::{Card, HIDDEN_CARD_CODE};
use crate::result::RoundResult;

use super::{Round, RoundState};

/// A card as shown on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// Face up.
    Up(Card),
    /// Face down (the dealer's hole card).
    Down,
}

impl CardFace {
    /// Presentation code; face-down cards use [`HIDDEN_CARD_CODE`].
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::Up(card) => card.code(),
            Self::Down => String::from(HIDDEN_CARD_CODE),
        }
    }
}

/// Snapshot of a round with the dealer's hole card hidden until settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Round state.
    pub state: RoundState,
    /// The player's cards.
    pub player_cards: Vec<Card>,
    /// The player's score.
    pub player_value: u8,
    /// The dealer's cards; only the first is face up before settlement.
    pub dealer_cards: Vec<CardFace>,
    /// The dealer's score, withheld before settlement.
    pub dealer_value: Option<u8>,
    /// The result once settled.
    pub result: Option<RoundResult>,
}

impl Round {
    /// Returns the table as a player would see it.
    #[must_use]
    pub fn view(&self) -> TableView {
        let revealed = self.is_settled();
        let dealer_cards = self
            .dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(index, &card)| {
                if revealed || index == 0 {
                    CardFace::Up(card)
                } else {
                    CardFace::Down
                }
            })
            .collect();

        TableView {
            state: self.state,
            player_cards: self.player.cards().to_vec(),
            player_value: self.player.value(),
            dealer_cards,
            dealer_value: revealed.then(|| self.dealer.value()),
            result: self.result,
        }
    }
}
