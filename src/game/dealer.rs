extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use rand::Rng;
use tracing::trace;

use crate::card::Card;
use crate::error::DealerError;
use crate::policy::dealer_should_hit;
use crate::result::{Outcome, RoundResult, Settlement};

use super::{Round, RoundState};

/// Compares two non-busted scores.
fn compare_scores(player: u8, dealer: u8) -> Outcome {
    match player.cmp(&dealer) {
        Ordering::Greater => Outcome::PlayerWin,
        Ordering::Less => Outcome::DealerWin,
        Ordering::Equal => Outcome::Tie,
    }
}

impl Round {
    /// Dealer plays their hand and the round is settled.
    ///
    /// The dealer reveals their hole card and draws one card at a time while
    /// below 17, stopping as soon as they reach 17 or bust. The whole turn
    /// happens in this one call.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealer's turn or the deck
    /// runs out while the dealer must draw. The round is left untouched on
    /// error.
    pub fn dealer_play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Card>, DealerError> {
        if self.state != RoundState::DealerTurn {
            return Err(DealerError::InvalidState);
        }

        // Draw into copies so an exhausted deck leaves the round as it was.
        let mut dealer = self.dealer.clone();
        let mut deck = self.deck.clone();
        dealer.reveal_hole();

        let mut drawn_cards = Vec::new();
        while dealer_should_hit(dealer.value()) {
            let card = deck.draw(rng).ok_or(DealerError::NoCards)?;
            dealer.add_card(card);
            drawn_cards.push(card);
            trace!(%card, value = dealer.value(), "dealer draws");
        }

        self.dealer = dealer;
        self.deck = deck;

        if self.dealer.is_bust() {
            self.settle(Outcome::PlayerWin, Settlement::DealerBust);
        } else {
            let outcome = compare_scores(self.player.value(), self.dealer.value());
            self.settle(outcome, Settlement::Comparison);
        }

        Ok(drawn_cards)
    }

    /// Settles the round, playing out the dealer first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the player still has to act, or if dealer play
    /// fails.
    pub fn showdown<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RoundResult, DealerError> {
        if self.state == RoundState::DealerTurn {
            self.dealer_play(rng)?;
        }
        self.result.ok_or(DealerError::InvalidState)
    }
}
