use rand::Rng;
use tracing::{debug, trace};

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::BLACKJACK;
use crate::policy::Decision;
use crate::result::{Outcome, Settlement};

use super::{Round, RoundState};

impl Round {
    fn ensure_player_turn(&self) -> Result<(), ActionError> {
        if self.state != RoundState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }
        Ok(())
    }

    /// Player action: Hit (draw a card).
    ///
    /// Busting settles the round for the dealer. Reaching exactly 21 ends the
    /// player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the player's turn or the deck
    /// is empty. The round is left untouched on error.
    pub fn hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let card = self.deck.draw(rng).ok_or(ActionError::NoCards)?;
        self.player.add_card(card);

        let value = self.player.value();
        trace!(%card, value, "player hits");

        if value > BLACKJACK {
            self.settle(Outcome::DealerWin, Settlement::PlayerBust);
        } else if value == BLACKJACK {
            debug!("player reached 21");
            self.state = RoundState::DealerTurn;
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the player's turn.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        trace!(value = self.player.value(), "player stands");
        self.state = RoundState::DealerTurn;
        Ok(())
    }

    /// Applies a player decision. Returns the drawn card on a hit.
    ///
    /// # Errors
    ///
    /// Same as [`Round::hit`] and [`Round::stand`].
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        decision: Decision,
        rng: &mut R,
    ) -> Result<Option<Card>, ActionError> {
        match decision {
            Decision::Hit => self.hit(rng).map(Some),
            Decision::Stand => self.stand().map(|()| None),
        }
    }
}
